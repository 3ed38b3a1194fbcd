//! Completion capability and its OpenAI-compatible implementation

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::errors::SummaryError;
use crate::utils::constants::{DEFAULT_SUMMARY_MODEL, SUMMARY_TIMEOUT_SECS};

/// Default API root when `OPENAI_BASE_URL` is unset
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// One completion call: a system prompt, a user prompt and sampling limits
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text completion capability
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, SummaryError>;
}

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Chat-completions client for OpenAI and compatible servers
#[derive(Debug, Clone)]
pub struct OpenAiSummarizer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiSummarizer {
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs(SUMMARY_TIMEOUT_SECS),
        }
    }

    /// Build from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `AUTOSEARCH_MODEL`
    ///
    /// `model_override` beats the environment; the default model is used
    /// when neither is set.
    pub fn from_env(model_override: Option<String>) -> Result<Self, SummaryError> {
        let api_key = env("OPENAI_API_KEY")
            .ok_or_else(|| SummaryError::NotConfigured("missing OPENAI_API_KEY".to_string()))?;
        let base_url = env("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        let model = model_override
            .or_else(|| env("AUTOSEARCH_MODEL"))
            .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());
        Ok(Self::new(api_key, base_url, model))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, SummaryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SummaryError::Status { status, body })
    }

    /// Check the key by listing models; returns how many are visible
    pub async fn verify(&self) -> Result<usize, SummaryError> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .timeout(self.timeout)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await?;
        let models: ModelList = Self::error_for_status(response).await?.json().await?;
        info!("Summarizer verified, {} models available", models.data.len());
        Ok(models.data.len())
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, SummaryError> {
        let body = ChatCompletionsRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            "Requesting completion from {} ({} prompt chars)",
            self.model,
            request.user.len()
        );
        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummaryError::Timeout(self.timeout.as_secs())
                } else {
                    SummaryError::Http(e)
                }
            })?;

        let parsed: ChatCompletionsResponse = Self::error_for_status(response).await?.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(SummaryError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}
