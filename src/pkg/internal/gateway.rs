use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request error: {0}")]
    Transport(String),

    #[error("HTTP error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Malformed(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

/// Outbound JSON calls to third-party APIs.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
}

impl Gateway {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Gateway { client })
    }

    /// POSTs `body` as JSON and returns the decoded JSON reply. Non-2xx
    /// replies come back as `Upstream` carrying the raw body.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        mut headers: HeaderMap,
        body: &B,
    ) -> Result<Value, GatewayError> {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("{} responded with {}", url, status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("upstream error from {}: {} {}", url, status, &body);
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}
