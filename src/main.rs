use clap::Parser;
use energylabel_lookup::adapters::clock::SystemClock;
use energylabel_lookup::adapters::guard::AllowAll;
use energylabel_lookup::adapters::http::ReqwestGetter;
use energylabel_lookup::adapters::usage::InMemoryUsageCounter;
use energylabel_lookup::app::render_text;
use energylabel_lookup::core::usage::UsagePeriod;
use energylabel_lookup::utils::error::{ErrorSeverity, LabelError};
use energylabel_lookup::utils::{logger, validation::Validate};
use energylabel_lookup::{
    ApiKeySettings, CliConfig, JsonEnvelope, LookupEngine, LookupForm, StaticSettings, TomlConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 先讀 TOML，才能決定用哪一種 logger
    let toml = match config.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(toml) => toml,
        Err(e) => {
            logger::init_cli_logger(config.verbose);
            fail(&e, config.json);
        }
    };

    match &toml {
        Some(toml) if !config.verbose => logger::init_with_level(toml.log_level(), toml.json_logs()),
        _ => logger::init_cli_logger(config.verbose),
    }

    tracing::info!("Starting energylabel-lookup CLI");
    if let Some(toml) = &toml {
        config.merge_toml(toml);
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        fail(&e, config.json);
    }

    // 命令列 / 環境變數 > 設定檔
    let stored = StaticSettings::new(
        toml.as_ref()
            .and_then(TomlConfig::resolved_api_key)
            .unwrap_or_default(),
    );
    let settings = ApiKeySettings::new(config.api_key.clone(), stored);

    let engine = match LookupEngine::new(
        settings,
        InMemoryUsageCounter::new(),
        ReqwestGetter::new(),
        Box::new(SystemClock),
        Box::new(AllowAll),
        &config,
    ) {
        Ok(engine) => engine,
        Err(e) => fail(&e, config.json),
    };

    let form = LookupForm::new(
        config.postcode.clone(),
        config.house_number.clone(),
        config.suffix.clone(),
    );

    match engine.lookup(&form).await {
        Ok(result) => {
            if config.json {
                println!("{}", JsonEnvelope::success(&result)?.to_json()?);
            } else {
                print!("{}", render_text(&result));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            report(&e, config.json);

            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    if config.show_usage {
        let report = engine.usage_report(UsagePeriod::Week);
        if let Some(today) = report.daily.last() {
            println!("📊 Lookups this run ({}): {}", today.date, today.count);
        }
    }

    Ok(())
}

fn report(e: &LabelError, json: bool) {
    if json {
        match JsonEnvelope::failure(e).to_json() {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("❌ {}", e.user_friendly_message()),
        }
    } else {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
    }
}

fn fail(e: &LabelError, json: bool) -> ! {
    report(e, json);
    std::process::exit(exit_code(e).max(1));
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &LabelError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,      // 查無資料，不算失敗
        ErrorSeverity::Medium => 2,   // 可重試
        ErrorSeverity::High => 1,     // 輸入或授權錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}
