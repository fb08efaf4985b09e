use crate::domain::ports::SettingsStore;

pub const API_KEY_ENV: &str = "EP_ONLINE_API_KEY";

/// 固定的 API key
#[derive(Clone, Default)]
pub struct StaticSettings {
    api_key: String,
}

impl StaticSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
        }
    }
}

impl std::fmt::Debug for StaticSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSettings")
            .field("api_key_set", &!self.api_key.is_empty())
            .finish()
    }
}

impl SettingsStore for StaticSettings {
    fn api_key(&self) -> String {
        self.api_key.clone()
    }
}

/// 優先順序：明確指定（環境變數 / 命令列）> 儲存的設定
#[derive(Debug, Clone)]
pub struct ApiKeySettings<S: SettingsStore> {
    override_key: Option<String>,
    stored: S,
}

impl<S: SettingsStore> ApiKeySettings<S> {
    pub fn new(override_key: Option<String>, stored: S) -> Self {
        Self {
            override_key: override_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            stored,
        }
    }

    pub fn from_env(stored: S) -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok(), stored)
    }
}

impl<S: SettingsStore> SettingsStore for ApiKeySettings<S> {
    fn api_key(&self) -> String {
        match &self.override_key {
            Some(key) => key.clone(),
            None => self.stored.api_key(),
        }
    }
}
