use crate::utils::error::TransportFailure;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// 提供 API key；未設定時回傳空字串
pub trait SettingsStore: Send + Sync {
    fn api_key(&self) -> String;
}

/// 每日查詢計數。序列化遞增是實作端的責任。
pub trait UsageCounter: Send + Sync {
    fn increment(&self, date: NaiveDate);

    /// 閉區間 `[from, to]` 內有紀錄的日期
    fn counts(&self, from: NaiveDate, to: NaiveDate) -> BTreeMap<NaiveDate, u64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait HttpGetter: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Anti-forgery 檢查，在驗證表單之前執行
pub trait RequestGuard: Send + Sync {
    fn verify(&self, token: Option<&str>) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn registry_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
