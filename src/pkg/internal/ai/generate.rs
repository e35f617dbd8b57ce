use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::{
    pkg::internal::{
        ai::spec::{Role, Turn},
        gateway::{Gateway, GatewayError},
    },
    prelude::Result,
};

#[async_trait::async_trait]
pub trait GenerateOps: Send + Sync {
    /// Asks the model for the next reply. `history` is the conversation so
    /// far, not including `prompt`.
    async fn generate(
        &self,
        history: &[Turn],
        system_instruction: &str,
        prompt: &str,
    ) -> core::result::Result<String, GatewayError>;
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    gateway: Gateway,
    url: String,
    api_key: HeaderValue,
}

impl GeminiClient {
    pub fn new(gateway: Gateway, endpoint: &str, model: &str, api_key: &str) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(api_key)?;
        api_key.set_sensitive(true);
        Ok(GeminiClient {
            gateway,
            url: format!(
                "{}/models/{}:generateContent",
                endpoint.trim_end_matches('/'),
                model
            ),
            api_key,
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn new(role: Option<Role>, text: &'a str) -> Self {
        Content {
            role,
            parts: [Part { text }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[async_trait::async_trait]
impl GenerateOps for GeminiClient {
    async fn generate(
        &self,
        history: &[Turn],
        system_instruction: &str,
        prompt: &str,
    ) -> core::result::Result<String, GatewayError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::new(Some(turn.role), &turn.text))
            .collect();
        contents.push(Content::new(Some(Role::User), prompt));
        let request = GenerateRequest {
            system_instruction: Content::new(None, system_instruction),
            contents,
        };

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", self.api_key.clone());
        let value = self.gateway.post_json(&self.url, headers, &request).await?;
        let response: GenerateResponse = serde_json::from_value(value)
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        response
            .text()
            .ok_or_else(|| GatewayError::Malformed("no candidate text in response".into()))
    }
}
