use crate::adapters::guard::{AllowAll, SharedTokenGuard};
use crate::core::normalizer::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, RequestGuard};
use crate::utils::error::{LabelError, Result};
use crate::utils::validation::{validate_timeout, validate_url, Validate};
use std::env;

pub const ENDPOINT_ENV: &str = "EP_ONLINE_ENDPOINT";
pub const TIMEOUT_ENV: &str = "EP_ONLINE_TIMEOUT_SECONDS";
pub const FORM_TOKEN_ENV: &str = "EP_ONLINE_FORM_TOKEN";

/// Lambda 只從環境變數讀設定；API key 由 `ApiKeySettings::from_env` 處理
#[derive(Clone)]
pub struct LambdaConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    /// 表單 nonce；有設定時每個請求都必須帶相同的值
    pub form_token: Option<String>,
}

impl std::fmt::Debug for LambdaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("form_token", &self.form_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_seconds = match lookup(TIMEOUT_ENV) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse()
                    .map_err(|_| LabelError::InvalidConfigValueError {
                        field: TIMEOUT_ENV.to_string(),
                        value: raw.clone(),
                        reason: "must be a whole number of seconds".to_string(),
                    })?
            }
            _ => DEFAULT_TIMEOUT_SECONDS,
        };

        let form_token = lookup(FORM_TOKEN_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            endpoint,
            timeout_seconds,
            form_token,
        })
    }

    pub fn request_guard(&self) -> Box<dyn RequestGuard> {
        match &self.form_token {
            Some(token) => Box::new(SharedTokenGuard::new(token.clone())),
            None => {
                tracing::warn!("⚠️ {} not set, form nonce is not verified", FORM_TOKEN_ENV);
                Box::new(AllowAll)
            }
        }
    }
}

impl ConfigProvider for LambdaConfig {
    fn registry_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url(ENDPOINT_ENV, &self.endpoint)?;
        validate_timeout(TIMEOUT_ENV, self.timeout_seconds)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LambdaConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reads_overrides() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            (ENDPOINT_ENV, "http://localhost:8080/Adres"),
            (TIMEOUT_ENV, " 10 "),
        ]))
        .unwrap();
        assert_eq!(config.registry_endpoint(), "http://localhost:8080/Adres");
        assert_eq!(config.timeout_seconds(), 10);
    }

    #[test]
    fn test_form_token_selects_guard() {
        let config = LambdaConfig::from_lookup(lookup_from(&[(FORM_TOKEN_ENV, " n0nce ")])).unwrap();
        assert_eq!(config.form_token.as_deref(), Some("n0nce"));
        assert!(!format!("{:?}", config).contains("n0nce"));

        let guard = config.request_guard();
        assert!(guard.verify(Some("n0nce")));
        assert!(!guard.verify(Some("anything")));
        assert!(!guard.verify(None));

        let open = LambdaConfig::from_lookup(lookup_from(&[(FORM_TOKEN_ENV, "")])).unwrap();
        assert!(open.form_token.is_none());
        assert!(open.request_guard().verify(None));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let result = LambdaConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert!(matches!(
            result,
            Err(LabelError::InvalidConfigValueError { .. })
        ));

        let config = LambdaConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "900")])).unwrap();
        assert!(config.validate().is_err());
    }
}
