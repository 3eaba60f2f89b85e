//! Outbound chat-completion call.
//!
//! `CompletionClient` is the seam the dispatcher talks to; `GatewayClient` is
//! the HTTP implementation against an OpenAI-compatible endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or empty when the gateway sent none.
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request and return the raw reply text.
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest) -> Result<String, DispatchError>;
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    endpoint: String,
}

impl GatewayClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ai-assistant-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for GatewayClient {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest) -> Result<String, DispatchError> {
        debug!(messages = request.messages.len(), "Sending completion request");

        let res = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("AI gateway request failed: {}", e);
                DispatchError::Transport(e.to_string())
            })?;

        match res.status() {
            s if s.is_success() => {
                let body = res.json::<ChatCompletionResponse>().await.map_err(|e| {
                    error!("AI gateway response could not be decoded: {}", e);
                    DispatchError::InvalidResponse(e.to_string())
                })?;
                Ok(body.into_text())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("AI gateway rate limit hit");
                Err(DispatchError::RateLimited)
            }
            StatusCode::PAYMENT_REQUIRED => {
                warn!("AI gateway credits exhausted");
                Err(DispatchError::PaymentRequired)
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                error!(status, %body, "AI gateway error");
                Err(DispatchError::Upstream { status, body })
            }
        }
    }
}
