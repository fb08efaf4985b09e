pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::JsonEnvelope;
pub use config::lambda::LambdaConfig;
pub use config::settings::{ApiKeySettings, StaticSettings};
pub use config::toml_config::TomlConfig;
pub use core::engine::LookupEngine;
pub use core::{LookupForm, LookupResult};
pub use utils::error::{LabelError, Result};
