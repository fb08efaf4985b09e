pub mod lambda;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::core::normalizer::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_timeout, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Clone, Serialize, Deserialize, Parser)]
#[command(name = "energylabel-lookup")]
#[command(about = "Look up Dutch energy labels in the EP-Online registry")]
pub struct CliConfig {
    /// Postcode, e.g. "1234 AB"
    #[arg(long)]
    pub postcode: String,

    /// House number (1-99999)
    #[arg(long = "huisnummer")]
    pub house_number: String,

    /// Optional house number addition (A, II, hoog, ...)
    #[arg(long = "toevoeging", default_value = "")]
    pub suffix: String,

    #[arg(long, env = "EP_ONLINE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// TOML config file; values from the command line take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the result as the JSON envelope used by the web form
    #[arg(long)]
    pub json: bool,

    /// Print the number of lookups counted during this run (usage is not persisted)
    #[arg(long)]
    pub show_usage: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

// API key 不出現在 Debug 輸出
#[cfg(feature = "cli")]
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("postcode", &self.postcode)
            .field("house_number", &self.house_number)
            .field("suffix", &self.suffix)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("config", &self.config)
            .field("json", &self.json)
            .field("show_usage", &self.show_usage)
            .field("verbose", &self.verbose)
            .finish()
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 用 TOML 檔補上命令列沒有明確指定的值（API key 另由 `ApiKeySettings` 處理）
    pub fn merge_toml(&mut self, toml: &toml_config::TomlConfig) {
        if self.endpoint == DEFAULT_ENDPOINT {
            self.endpoint = toml.registry_endpoint().to_string();
        }
        if self.timeout_seconds == DEFAULT_TIMEOUT_SECONDS {
            self.timeout_seconds = toml.timeout_seconds();
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn registry_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_timeout("timeout_seconds", self.timeout_seconds)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_args() {
        let config = CliConfig::try_parse_from([
            "energylabel-lookup",
            "--postcode",
            "1234 AB",
            "--huisnummer",
            "12",
            "--toevoeging",
            "A",
            "--api-key",
            "secret",
        ])
        .unwrap();

        assert_eq!(config.postcode, "1234 AB");
        assert_eq!(config.house_number, "12");
        assert_eq!(config.suffix, "A");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.validate().is_ok());
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_show_usage_help_mentions_run_scope() {
        use clap::CommandFactory;

        let help = CliConfig::command().render_long_help().to_string();
        assert!(help.contains("--show-usage"));
        assert!(help.contains("during this run"));
    }

    #[test]
    fn test_merge_toml_fills_defaults_only() {
        let toml = toml_config::TomlConfig::from_toml_str(
            r#"
[registry]
endpoint = "http://localhost:9999/Adres"
timeout_seconds = 10
api_key = "from-toml"
"#,
        )
        .unwrap();

        let mut config = CliConfig::try_parse_from([
            "energylabel-lookup",
            "--postcode",
            "1234AB",
            "--huisnummer",
            "1",
            "--timeout-seconds",
            "5",
        ])
        .unwrap();
        config.merge_toml(&toml);

        assert_eq!(config.endpoint, "http://localhost:9999/Adres");
        assert_eq!(config.timeout_seconds, 5);
    }
}
