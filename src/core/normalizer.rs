use crate::core::format::{format_date, format_registry_date, format_with_unit, parse_registry_datetime};
use crate::domain::model::{LookupResult, Query, RawLabelRecord};
use crate::domain::ports::{HttpGetter, HttpRequest, HttpResponse};
use crate::utils::error::LookupError;
use chrono::{DateTime, Utc};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://public.ep-online.nl/api/v5/PandEnergielabel/Adres";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 數值必須嚴格介於 0 與此值之間才算有效
pub const MAX_VALID_MEASUREMENT: f64 = 999_999.0;
/// 能耗大於等於此值時標記為「指示性」
pub const EXTREME_CONSUMPTION_THRESHOLD: f64 = 50_000.0;
pub const NEAR_EXPIRY_DAYS: i64 = 180;
pub const DEFAULT_STATUS: &str = "Actief";

const SECONDS_PER_DAY: i64 = 86_400;

/// 呼叫 EP-Online 並把第一筆記錄轉成 `LookupResult`。不重試。
#[derive(Debug, Clone)]
pub struct LookupNormalizer {
    endpoint: Url,
    timeout: Duration,
}

impl LookupNormalizer {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn build_request(&self, query: &Query, api_key: &str) -> HttpRequest {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("postcode", query.postcode());
            pairs.append_pair("huisnummer", &query.house_number().to_string());
            if let Some(suffix) = query.suffix() {
                pairs.append_pair("huisnummertoevoeging", suffix);
            }
        }

        HttpRequest {
            url,
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), api_key.to_string()),
            ],
            timeout: self.timeout,
        }
    }

    pub async fn lookup<H: HttpGetter + ?Sized>(
        &self,
        query: &Query,
        api_key: &str,
        transport: &H,
        now: DateTime<Utc>,
    ) -> Result<LookupResult, LookupError> {
        if api_key.is_empty() {
            return Err(LookupError::MissingApiKey);
        }

        let request = self.build_request(query, api_key);
        tracing::debug!("📡 GET {} for {}", self.endpoint, query);

        let response = transport
            .get(&request)
            .await
            .map_err(LookupError::TransportError)?;
        tracing::debug!("Registry response status: {}", response.status);

        let record = parse_response(&response)?;
        normalize(&record, now)
    }
}

impl Default for LookupNormalizer {
    fn default() -> Self {
        // DEFAULT_ENDPOINT 是合法的常數 URL
        let endpoint = Url::parse(DEFAULT_ENDPOINT).unwrap();
        Self::new(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }
}

/// 先看狀態碼，再解析 body
pub fn classify_status(status: u16) -> Result<(), LookupError> {
    match status {
        200 => Ok(()),
        404 => Err(LookupError::NotFound),
        401 => Err(LookupError::Unauthorized),
        429 => Err(LookupError::RateLimited),
        s if s >= 500 => Err(LookupError::ServiceUnavailable { status: s }),
        s => Err(LookupError::UnknownApiError { status: s }),
    }
}

/// 取出第一筆可用記錄
pub fn parse_response(response: &HttpResponse) -> Result<RawLabelRecord, LookupError> {
    classify_status(response.status)?;

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).map_err(|e| LookupError::MalformedResponse {
            reason: e.to_string(),
        })?;

    let first = match payload.as_array().and_then(|items| items.first()) {
        Some(first) => first,
        None => return Err(LookupError::NoDataForAddress),
    };

    let has_energy_class = first
        .get("Energieklasse")
        .map(|v| !v.is_null())
        .unwrap_or(false);
    if !has_energy_class {
        return Err(LookupError::NoDataForAddress);
    }

    serde_json::from_value(first.clone()).map_err(|e| LookupError::MalformedResponse {
        reason: e.to_string(),
    })
}

fn is_valid_measurement(value: f64) -> bool {
    value > 0.0 && value < MAX_VALID_MEASUREMENT
}

/// 由原始記錄導出呈現用結果；缺少能源等級或有效日期即為無資料
pub fn normalize(record: &RawLabelRecord, now: DateTime<Utc>) -> Result<LookupResult, LookupError> {
    let energy_class = record
        .energy_class
        .clone()
        .filter(|c| !c.trim().is_empty())
        .ok_or(LookupError::NoDataForAddress)?;

    let valid_until = record
        .valid_until
        .as_deref()
        .and_then(parse_registry_datetime)
        .ok_or(LookupError::NoDataForAddress)?;

    let co2 = record.co2_emission.unwrap_or(0.0);
    let co2_is_valid = is_valid_measurement(co2);

    let consumption = record.energy_consumption.unwrap_or(0.0);
    let consumption_is_valid = is_valid_measurement(consumption);
    let consumption_is_extreme = consumption >= EXTREME_CONSUMPTION_THRESHOLD;

    let days_until_expiry = (valid_until - now).num_seconds().div_euclid(SECONDS_PER_DAY);
    let is_expired = valid_until < now;
    let is_near_expiry = days_until_expiry > 0 && days_until_expiry <= NEAR_EXPIRY_DAYS;

    let address = format!(
        "{} {}",
        record.postcode.as_deref().unwrap_or_default(),
        record.house_number.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string();

    let with_unit = |value: Option<f64>, decimals: usize, unit: &str| {
        value.map(|v| format_with_unit(v, decimals, unit))
    };

    Ok(LookupResult {
        energy_class,
        address,
        construction_year: record.construction_year.clone(),
        building_type: record.building_type.clone(),
        building_subtype: record.building_subtype.clone(),
        building_class: record.building_class.clone(),

        energy_consumption: consumption_is_valid
            .then(|| format_with_unit(consumption, 0, " kWh/jaar")),
        energy_consumption_is_valid: consumption_is_valid,
        energy_consumption_is_extreme: consumption_is_extreme,
        co2_emission: co2_is_valid.then(|| format_with_unit(co2, 2, " kg CO2/jaar")),
        co2_is_valid,

        certificate_holder: record.certificate_holder.clone(),
        valid_until,
        valid_until_display: format_date(&valid_until),
        registration_date: format_registry_date(record.registration_date.as_deref()),
        inspection_date: format_registry_date(record.inspection_date.as_deref()),
        status: record.status.clone(),
        status_display: record
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),

        energy_index: with_unit(record.energy_index, 1, ""),
        primary_fossil_energy: with_unit(record.primary_fossil_energy, 0, " kWh/m²/jaar"),
        energy_demand: with_unit(record.energy_demand, 0, " kWh/m²/jaar"),
        renewable_share: with_unit(record.renewable_share, 1, "%"),
        usable_area: with_unit(record.usable_area, 0, " m²"),
        compactness: with_unit(record.compactness, 1, " m³/m²"),
        temperature_exceedance: with_unit(record.temperature_exceedance, 1, "%"),
        heat_demand: with_unit(record.heat_demand, 0, " kWh/m²/jaar"),
        inspection_type: record.inspection_type.clone(),
        is_simplified_label: record.is_simplified_label,

        is_expired,
        is_near_expiry,
        days_until_expiry,
    })
}
