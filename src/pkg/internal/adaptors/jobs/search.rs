use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::SearchQuery,
        gateway::{Gateway, GatewayError},
    },
    prelude::Result,
};

/// Client for the TheirStack jobs-search endpoint.
#[derive(Debug, Clone)]
pub struct JobSearch {
    gateway: Gateway,
    url: String,
    authorization: HeaderValue,
}

impl JobSearch {
    pub fn new(gateway: Gateway, url: &str, api_key: &str) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
        authorization.set_sensitive(true);
        Ok(JobSearch {
            gateway,
            url: url.to_string(),
            authorization,
        })
    }

    /// One POST per call, no paging loop, no retry.
    pub async fn search(&self, query: &SearchQuery) -> core::result::Result<Value, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        let payload = query.payload();
        tracing::debug!(
            "searching jobs: {}",
            serde_json::to_string(&payload).unwrap_or_default()
        );
        self.gateway.post_json(&self.url, headers, &payload).await
    }
}
