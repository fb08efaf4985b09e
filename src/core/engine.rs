use crate::core::normalizer::LookupNormalizer;
use crate::core::usage::{usage_report, UsagePeriod, UsageReport};
use crate::core::validator::validate;
use crate::domain::model::{LookupForm, LookupResult};
use crate::domain::ports::{
    Clock, ConfigProvider, HttpGetter, RequestGuard, SettingsStore, UsageCounter,
};
use crate::utils::error::{LabelError, Result};
use crate::utils::validation::{validate_timeout, validate_url};
use std::time::Duration;

/// guard → validate → registry lookup → 成功時計數
pub struct LookupEngine<S: SettingsStore, U: UsageCounter, H: HttpGetter> {
    settings: S,
    usage: U,
    transport: H,
    normalizer: LookupNormalizer,
    clock: Box<dyn Clock>,
    guard: Box<dyn RequestGuard>,
}

impl<S: SettingsStore, U: UsageCounter, H: HttpGetter> LookupEngine<S, U, H> {
    /// clock 與 guard 由呼叫端（binary）決定
    pub fn new<C: ConfigProvider + ?Sized>(
        settings: S,
        usage: U,
        transport: H,
        clock: Box<dyn Clock>,
        guard: Box<dyn RequestGuard>,
        config: &C,
    ) -> Result<Self> {
        let endpoint = validate_url("registry.endpoint", config.registry_endpoint())?;
        validate_timeout("registry.timeout_seconds", config.timeout_seconds())?;

        Ok(Self {
            settings,
            usage,
            transport,
            normalizer: LookupNormalizer::new(
                endpoint,
                Duration::from_secs(config.timeout_seconds()),
            ),
            clock,
            guard,
        })
    }

    pub fn with_guard(mut self, guard: impl RequestGuard + 'static) -> Self {
        self.guard = Box::new(guard);
        self
    }

    pub fn usage(&self) -> &U {
        &self.usage
    }

    pub async fn lookup(&self, form: &LookupForm) -> Result<LookupResult> {
        if !self.guard.verify(form.token.as_deref()) {
            tracing::warn!("🚫 Request rejected by request guard");
            return Err(LabelError::Forbidden);
        }

        let query = validate(&form.postcode, &form.house_number, &form.suffix).map_err(|e| {
            tracing::debug!("Input rejected on field '{}': {}", e.field(), e);
            e
        })?;

        tracing::info!("🔍 Looking up energy label for {}", query);

        let now = self.clock.now();
        let api_key = self.settings.api_key();

        match self
            .normalizer
            .lookup(&query, &api_key, &self.transport, now)
            .await
        {
            Ok(result) => {
                // 只有成功的查詢才計數
                self.usage.increment(now.date_naive());
                tracing::info!(
                    "✅ Found label {} for {} (valid until {})",
                    result.energy_class,
                    query,
                    result.valid_until_display
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("❌ Lookup for {} failed: {} ({})", query, e, e.kind());
                Err(e.into())
            }
        }
    }

    pub fn usage_report(&self, period: UsagePeriod) -> UsageReport {
        usage_report(&self.usage, period, self.clock.now().date_naive())
    }
}
