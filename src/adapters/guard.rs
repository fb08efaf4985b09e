use crate::domain::ports::RequestGuard;
use subtle::ConstantTimeEq;

/// 不做檢查（CLI 等受信任的呼叫端）
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RequestGuard for AllowAll {
    fn verify(&self, _token: Option<&str>) -> bool {
        true
    }
}

/// 比對固定 token；token 的簽發不在這裡處理
#[derive(Debug, Clone)]
pub struct SharedTokenGuard {
    token: String,
}

impl SharedTokenGuard {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl RequestGuard for SharedTokenGuard {
    fn verify(&self, token: Option<&str>) -> bool {
        match token {
            Some(candidate) if !self.token.is_empty() => {
                candidate.as_bytes().ct_eq(self.token.as_bytes()).into()
            }
            _ => false,
        }
    }
}
