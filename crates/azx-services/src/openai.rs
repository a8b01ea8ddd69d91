//! Azure OpenAI chat completions

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use azx_config::OpenAiSettings;

use crate::client::{DEFAULT_TIMEOUT, ensure_success, http_client};
use crate::error::{Result, ServiceError};

const SERVICE: &str = "Azure OpenAI";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
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

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Deployment reply. Unknown fields land in `extra` so reprinting the
/// response keeps everything Azure sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl ChatResponse {
    /// Content of the first choice. An empty `choices` array is an error.
    pub fn first_content(&self) -> Result<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(ServiceError::EmptyChoices)
    }
}

pub struct ChatClient {
    http: reqwest::Client,
    settings: OpenAiSettings,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            settings,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-request timeout. Large-prompt callers pass
    /// [`crate::client::LONG_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.settings.endpoint, self.settings.deployment, self.settings.api_version
        )
    }

    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        debug!(
            deployment = %self.settings.deployment,
            messages = request.messages.len(),
            "sending chat completion request"
        );
        let response = self
            .http
            .post(self.completions_url())
            .header("api-key", &self.settings.key)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        Ok(response.json().await?)
    }
}
