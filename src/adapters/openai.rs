use crate::domain::model::Prompt;
use crate::domain::ports::{CompletionService, ConfigProvider};
use crate::utils::error::{Result, SimplifyError};
use async_trait::async_trait;
use std::time::Duration;

const API_KEY_VAR: &str = "OPENAI_API_KEY";

// Upper bound on upstream body text kept in error values and logs.
const BODY_EXCERPT_CHARS: usize = 300;

/// OpenAI-compatible completion client. Built once in `main` from config
/// plus environment, then injected wherever a `CompletionService` is
/// needed.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new<C: ConfigProvider>(config: &C, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            api_key,
        })
    }

    /// Read the API key from the process environment. A missing key is
    /// not fatal here; it surfaces as a configuration error on the first
    /// completion attempt.
    pub fn from_env<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!("{} is not set; upstream requests will fail", API_KEY_VAR);
        }

        Self::new(config, api_key)
    }

    /// Pull the text payload out of whichever envelope shape the service
    /// answered with: a flat `output_text` field, a plain-string chat
    /// `choices[0].message.content`, or the nested content-part array.
    fn extract_payload(envelope: &serde_json::Value) -> Option<String> {
        if let Some(text) = envelope.get("output_text").and_then(|t| t.as_str()) {
            return Some(text.to_string());
        }

        let content = envelope
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?;

        if let Some(text) = content.as_str() {
            return Some(text.to_string());
        }

        content
            .get(0)?
            .get("text")?
            .as_str()
            .map(|t| t.to_string())
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let api_key =
            self.api_key
                .as_deref()
                .ok_or_else(|| SimplifyError::MissingConfigError {
                    field: API_KEY_VAR.to_string(),
                })?;

        let body = serde_json::json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
        });

        tracing::debug!("Sending completion request to {}", self.api_base);
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Upstream response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Upstream returned {}: {}",
                status,
                excerpt(&body)
            );
            return Err(SimplifyError::UpstreamStatus {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let envelope: serde_json::Value = response.json().await?;
        Self::extract_payload(&envelope).ok_or(SimplifyError::MalformedEnvelopeError)
    }
}
