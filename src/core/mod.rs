pub mod engine;
pub mod format;
pub mod normalizer;
pub mod usage;
pub mod validator;

pub use crate::domain::model::{LookupForm, LookupResult, Query, RawLabelRecord};
pub use crate::domain::ports::{
    Clock, ConfigProvider, HttpGetter, RequestGuard, SettingsStore, UsageCounter,
};
pub use crate::utils::error::Result;
