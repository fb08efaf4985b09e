use anyhow::Result;
use chrono::{TimeZone, Utc};
use energylabel_lookup::adapters::clock::FixedClock;
use energylabel_lookup::adapters::guard::AllowAll;
use energylabel_lookup::adapters::http::ReqwestGetter;
use energylabel_lookup::adapters::usage::InMemoryUsageCounter;
use energylabel_lookup::core::usage::UsagePeriod;
use energylabel_lookup::core::ConfigProvider;
use energylabel_lookup::utils::error::{LookupError, TransportFailure};
use energylabel_lookup::{JsonEnvelope, LabelError, LookupEngine, LookupForm, StaticSettings};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

struct RegistryConfig {
    endpoint: String,
    timeout_seconds: u64,
}

impl ConfigProvider for RegistryConfig {
    fn registry_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

type Engine = LookupEngine<StaticSettings, InMemoryUsageCounter, ReqwestGetter>;

fn engine_for(server: &MockServer, timeout_seconds: u64) -> Result<Engine> {
    let config = RegistryConfig {
        endpoint: server.url("/api/v5/PandEnergielabel/Adres"),
        timeout_seconds,
    };
    let engine = LookupEngine::new(
        StaticSettings::new("test-api-key"),
        InMemoryUsageCounter::new(),
        ReqwestGetter::new(),
        Box::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
        )),
        Box::new(AllowAll),
        &config,
    )?;
    Ok(engine)
}

fn registry_record() -> serde_json::Value {
    json!([{
        "Energieklasse": "A+",
        "Postcode": "1234AB",
        "Huisnummer": 10,
        "Bouwjaar": 1998,
        "Gebouwtype": "Woning",
        "Gebouwsubtype": "Tussenwoning",
        "BerekendeEnergieverbruik": "12500",
        "BerekendeCO2Emissie": 2345.678,
        "Geldig_tot": "2035-05-12T00:00:00",
        "Registratiedatum": "2025-05-12T10:00:00",
        "Status": "Actief",
        "EnergieIndex": 1.05,
        "IsVereenvoudigdLabel": "true"
    }])
}

#[tokio::test]
async fn test_lookup_against_mock_registry() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v5/PandEnergielabel/Adres")
            .query_param("postcode", "1234AB")
            .query_param("huisnummer", "10")
            .header("Authorization", "test-api-key")
            .header("Accept", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(registry_record());
    });

    let engine = engine_for(&server, 5)?;
    let result = engine.lookup(&LookupForm::new(" 1234 ab ", "10", "")).await?;

    api_mock.assert();
    assert_eq!(result.energy_class, "A+");
    assert_eq!(result.address, "1234AB 10");
    assert_eq!(result.construction_year.as_deref(), Some("1998"));
    assert_eq!(result.energy_consumption.as_deref(), Some("12.500 kWh/jaar"));
    assert_eq!(result.co2_emission.as_deref(), Some("2.345,68 kg CO2/jaar"));
    assert_eq!(result.energy_index.as_deref(), Some("1,1"));
    assert_eq!(result.valid_until_display, "12-05-2035");
    assert_eq!(result.registration_date.as_deref(), Some("12-05-2025"));
    assert!(result.is_simplified_label);
    assert!(!result.is_expired);
    assert!(!result.is_near_expiry);

    assert_eq!(engine.usage_report(UsagePeriod::Week).total, 1);

    let envelope = JsonEnvelope::success(&result)?;
    assert!(envelope.success);
    assert_eq!(envelope.data["gebouwsubtype"], "Tussenwoning");
    Ok(())
}

#[tokio::test]
async fn test_suffix_is_sent_as_query_param() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v5/PandEnergielabel/Adres")
            .query_param("huisnummertoevoeging", "II");
        then.status(200).json_body(registry_record());
    });

    let engine = engine_for(&server, 5)?;
    engine
        .lookup(&LookupForm::new("1234AB", "10", "  II "))
        .await?;

    api_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_registry_status_codes_are_classified() -> Result<()> {
    let cases = [
        (404, LookupError::NotFound),
        (401, LookupError::Unauthorized),
        (429, LookupError::RateLimited),
        (503, LookupError::ServiceUnavailable { status: 503 }),
        (418, LookupError::UnknownApiError { status: 418 }),
    ];

    for (status, expected) in cases {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v5/PandEnergielabel/Adres");
            then.status(status).body("{\"message\":\"nope\"}");
        });

        let engine = engine_for(&server, 5)?;
        let err = engine
            .lookup(&LookupForm::new("1234AB", "10", ""))
            .await
            .unwrap_err();

        match err {
            LabelError::Lookup(actual) => assert_eq!(actual, expected, "status {}", status),
            other => panic!("unexpected error for status {}: {:?}", status, other),
        }
        assert_eq!(engine.usage_report(UsagePeriod::Week).total, 0);
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_and_malformed_bodies() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).query_param("huisnummer", "1");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).query_param("huisnummer", "2");
        then.status(200).body("<html>maintenance</html>");
    });

    let engine = engine_for(&server, 5)?;

    let err = engine
        .lookup(&LookupForm::new("1234AB", "1", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, LabelError::Lookup(LookupError::NoDataForAddress)));

    let err = engine
        .lookup(&LookupForm::new("1234AB", "2", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LabelError::Lookup(LookupError::MalformedResponse { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_slow_registry_times_out() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(registry_record());
    });

    let engine = engine_for(&server, 1)?;
    let err = engine
        .lookup(&LookupForm::new("1234AB", "10", ""))
        .await
        .unwrap_err();

    match err {
        LabelError::Lookup(LookupError::TransportError(TransportFailure { timed_out, .. })) => {
            assert!(timed_out)
        }
        other => panic!("expected transport timeout, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_input_never_calls_registry() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(registry_record());
    });

    let engine = engine_for(&server, 5)?;
    let err = engine
        .lookup(&LookupForm::new("1234A", "10", ""))
        .await
        .unwrap_err();

    assert_eq!(
        err.user_friendly_message(),
        "Postcode is te kort. Voer 4 cijfers en 2 letters in."
    );
    api_mock.assert_hits(0);
    Ok(())
}
