#[cfg(feature = "lambda")]
use energylabel_lookup::adapters::clock::SystemClock;
#[cfg(feature = "lambda")]
use energylabel_lookup::adapters::http::ReqwestGetter;
#[cfg(feature = "lambda")]
use energylabel_lookup::adapters::usage::InMemoryUsageCounter;
#[cfg(feature = "lambda")]
use energylabel_lookup::app::handle_form;
#[cfg(feature = "lambda")]
use energylabel_lookup::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use energylabel_lookup::{
    ApiKeySettings, JsonEnvelope, LambdaConfig, LookupEngine, LookupForm, StaticSettings,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
type Engine = LookupEngine<ApiKeySettings<StaticSettings>, InMemoryUsageCounter, ReqwestGetter>;

#[cfg(feature = "lambda")]
async fn function_handler(
    engine: &Engine,
    event: LambdaEvent<LookupForm>,
) -> Result<JsonEnvelope, Error> {
    tracing::info!("Handling energy label lookup ({})", event.context.request_id);

    // 查詢失敗也是正常回應，只是 success = false
    Ok(handle_form(engine, &event.payload).await?)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let settings = ApiKeySettings::from_env(StaticSettings::default());
    let engine: Engine = LookupEngine::new(
        settings,
        InMemoryUsageCounter::new(),
        ReqwestGetter::new(),
        Box::new(SystemClock),
        config.request_guard(),
        &config,
    )?;

    run(service_fn(|event| function_handler(&engine, event))).await
}
