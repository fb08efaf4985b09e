use crate::domain::ports::{HttpGetter, HttpRequest, HttpResponse};
use crate::utils::error::TransportFailure;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted transport for tests and demos. Every call returns the same
/// response and records the request. Clones share the request log.
#[derive(Debug, Clone)]
pub struct MockGetter {
    response: Result<HttpResponse, TransportFailure>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockGetter {
    pub fn ok(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(failure: TransportFailure) -> Self {
        Self {
            response: Err(failure),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl HttpGetter for MockGetter {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.response.clone()
    }
}
