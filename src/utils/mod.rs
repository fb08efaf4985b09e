pub mod error;
pub mod logger;
pub mod serde_helpers;
pub mod validation;
