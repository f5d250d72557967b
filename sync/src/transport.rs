//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! The bridge talks HTTP only through [`HttpTransport`], so tests swap in an
//! in-memory fake and the CLI uses [`ReqwestTransport`]. A transport reports
//! what came back; interpreting status codes is the caller's job.

use std::time::Duration;

use serde_json::Value;

use crate::error::SyncError;

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`SyncError::Status`] unless the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns the status code of a non-success response.
    pub fn require_success(self) -> Result<Self, SyncError> {
        if self.is_success() { Ok(self) } else { Err(SyncError::Status(self.status)) }
    }
}

#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse, SyncError>;

    /// Issue a POST request with a JSON body.
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, SyncError>;
}

/// [`HttpTransport`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(timeout: Duration) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SyncError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SyncError> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, SyncError> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
