use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmSettings;
use crate::error::{QuoterError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A text-generation backend that can be asked for a JSON object.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// One chat completion in JSON-object mode.
    /// `Ok(None)` means the provider answered but produced no content.
    async fn complete_json(&self, messages: &[Message]) -> Result<Option<String>>;
}

/// OpenAI-compatible chat completions client.
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl LlmClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings.api_key.clone().ok_or(QuoterError::MissingApiKey)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Resolve the chat completions endpoint from the base URL.
    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    /// JSON body for one completion: JSON-object output at the configured temperature.
    fn request_body(&self, messages: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
            "temperature": self.temperature,
        })
    }

    fn build_request(&self, messages: &[Message]) -> Result<reqwest::Request> {
        Ok(self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .build()?)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete_json(&self, messages: &[Message]) -> Result<Option<String>> {
        let request = self.build_request(messages)?;

        debug!(model = %self.model, endpoint = %request.url(), "sending chat completion");
        let json: serde_json::Value = self
            .client
            .execute(request)
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(message_content(&json))
    }
}

/// Pull `choices[0].message.content` out of a completion response.
/// A null or absent content field yields `None`.
pub fn message_content(response: &serde_json::Value) -> Option<String> {
    response["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .map(str::to_string)
}
