use crate::app::presenter::JsonEnvelope;
use crate::core::engine::LookupEngine;
use crate::core::{HttpGetter, LookupForm, SettingsStore, UsageCounter};
use crate::utils::error::Result;

/// 表單請求 → JSON envelope。查詢失敗回傳 `success: false`，
/// 只有序列化失敗才是 Err。
pub async fn handle_form<S, U, H>(
    engine: &LookupEngine<S, U, H>,
    form: &LookupForm,
) -> Result<JsonEnvelope>
where
    S: SettingsStore,
    U: UsageCounter,
    H: HttpGetter,
{
    match engine.lookup(form).await {
        Ok(result) => JsonEnvelope::success(&result),
        Err(e) => {
            tracing::warn!(
                "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            Ok(JsonEnvelope::failure(&e))
        }
    }
}
