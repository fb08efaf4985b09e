use crate::domain::ports::{HttpGetter, HttpRequest, HttpResponse};
use crate::utils::error::TransportFailure;
use async_trait::async_trait;
use reqwest::Client;

/// 以 reqwest 實作的 HttpGetter
#[derive(Debug, Clone, Default)]
pub struct ReqwestGetter {
    client: Client,
}

impl ReqwestGetter {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpGetter for ReqwestGetter {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        // 構建請求
        let mut builder = self
            .client
            .get(request.url.clone())
            .timeout(request.timeout);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        // 執行請求
        let response = builder.send().await.map_err(to_failure)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(to_failure)?;

        Ok(HttpResponse { status, body })
    }
}

fn to_failure(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::timeout(err.to_string())
    } else {
        TransportFailure::new(err.to_string())
    }
}
