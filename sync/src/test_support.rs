//! In-memory transport shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crate::error::SyncError;
use crate::transport::{HttpResponse, HttpTransport};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

/// Answers from a route table; unknown routes fail like a refused connection.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    delays: Mutex<HashMap<String, Duration>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, method: &str, url: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            format!("{method} {url}"),
            HttpResponse { status, body: body.as_bytes().to_vec() },
        );
    }

    /// Hold the answer for `url` back by `delay` (tokio time).
    pub fn delay(&self, url: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(url.to_owned(), delay);
    }

    pub fn unroute(&self, method: &str, url: &str) {
        self.routes.lock().unwrap().remove(&format!("{method} {url}"));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.method == "POST").collect()
    }

    fn answer(&self, method: &'static str, url: &str, body: Option<&Value>) -> Result<HttpResponse, SyncError> {
        self.requests.lock().unwrap().push(Recorded { method, url: url.to_owned(), body: body.cloned() });
        self.routes
            .lock()
            .unwrap()
            .get(&format!("{method} {url}"))
            .cloned()
            .ok_or_else(|| SyncError::Transport(format!("connection refused: {url}")))
    }
}

#[async_trait::async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SyncError> {
        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.answer("GET", url, None)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, SyncError> {
        self.answer("POST", url, Some(body))
    }
}
