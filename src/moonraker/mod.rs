// Moonraker HTTP client via reqwest. One attempt per call; retries are the poller's job.

mod endpoint;

pub use endpoint::{Endpoint, STATUS_OBJECTS};

use bytes::Bytes;
use std::time::Duration;
use tracing::instrument;

/// Failure kinds the handler layer switches on to pick a status code.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Connection refused/reset, DNS failure or TLS rejection.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    BadStatus { status: u16 },

    #[error("upstream response could not be decoded: {0}")]
    Decode(String),

    #[error("upstream request failed: {0}")]
    Other(String),
}

impl UpstreamError {
    /// Classify a transport error by kind.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(timeout)
        } else if let Some(status) = err.status() {
            UpstreamError::BadStatus {
                status: status.as_u16(),
            }
        } else if err.is_connect() || err.is_request() {
            UpstreamError::Unreachable(err.to_string())
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Other(err.to_string())
        }
    }
}

/// Binary payload fetched from a webcam (snapshot).
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: Bytes,
    pub content_type: Option<String>,
}

pub struct MoonrakerClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl MoonrakerClient {
    /// * `base_url` - e.g. `http://printer.local:7127`, no trailing slash.
    pub fn new(base_url: String, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a Moonraker endpoint and return its `result` member (or the whole body when absent).
    #[instrument(skip(self), fields(client = "moonraker", operation = endpoint.name()))]
    pub async fn fetch_endpoint(
        &self,
        endpoint: Endpoint,
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let timeout = self.request_timeout;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::BadStatus {
                status: status.as_u16(),
            });
        }

        let mut body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::from_reqwest(e, timeout))?;
        if let Some(result) = body.get_mut("result") {
            return Ok(result.take());
        }
        Ok(body)
    }

    /// GET an arbitrary URL (webcam snapshot) under a hard wall-clock bound; the in-flight
    /// request is dropped when the bound elapses.
    #[instrument(skip(self), fields(client = "webcam", operation = "fetch_bytes"))]
    pub async fn fetch_bytes(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Fetched, UpstreamError> {
        let request = async {
            let response = self
                .client
                .get(url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| UpstreamError::from_reqwest(e, timeout))?;

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::BadStatus {
                    status: status.as_u16(),
                });
            }
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response
                .bytes()
                .await
                .map_err(|e| UpstreamError::from_reqwest(e, timeout))?;
            Ok(Fetched { body, content_type })
        };

        tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| UpstreamError::Timeout(timeout))?
    }
}
