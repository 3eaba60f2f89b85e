// src/services/dispatcher.rs
use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;

use super::{
    completion::{ChatCompletionRequest, ChatMessage, CompletionClient, GatewayClient},
    prompts::{self, DispatchKind},
};
use crate::{
    config::Config,
    error::DispatchError,
    message::{DispatchRequest, DispatchResult, TurnRole},
};

/// Values the dispatcher needs from configuration.
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub api_key: Option<String>,
    pub model: String,
}

impl From<&Config> for DispatcherSettings {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

/// Stateless request -> prompt -> completion pipeline.
///
/// Cheap to share behind an `Arc`; concurrent dispatches do not interact.
#[derive(Clone)]
pub struct Dispatcher {
    settings: DispatcherSettings,
    client: Arc<dyn CompletionClient>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("model", &self.settings.model)
            .field("has_api_key", &self.settings.api_key.is_some())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(settings: DispatcherSettings, client: Arc<dyn CompletionClient>) -> Self {
        Self { settings, client }
    }

    /// Build a dispatcher talking to the configured gateway.
    pub fn from_config(config: &Config) -> Result<Self, DispatchError> {
        let client = GatewayClient::new(config.gateway_url.clone(), config.request_timeout)?;
        Ok(Self::new(DispatcherSettings::from(config), Arc::new(client)))
    }

    /// Build the outbound completion request for `request`.
    pub fn build_completion(&self, request: &DispatchRequest) -> ChatCompletionRequest {
        let kind = DispatchKind::from_tag(request.tag());
        let rendered = prompts::render(kind, request);

        let mut messages = vec![ChatMessage::system(rendered.system)];
        if kind.is_conversational() {
            messages.extend(request.history.iter().map(|turn| match turn.role {
                TurnRole::User => ChatMessage::user(turn.content.clone()),
                TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
            }));
        }
        messages.push(ChatMessage::user(rendered.user));

        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages,
        }
    }

    /// Render the prompts for `request`, make one completion call, and return the reply verbatim.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4(), kind = request.tag().unwrap_or("chat")))]
    pub async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResult, DispatchError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                error!("AI gateway API key is not configured");
                DispatchError::MissingCredential
            })?;

        let completion = self.build_completion(request);
        info!(template = %DispatchKind::from_tag(request.tag()), "Dispatching AI request");

        let content = self.client.complete(api_key, &completion).await?;

        Ok(DispatchResult {
            content,
            kind: request.tag().unwrap_or(DispatchKind::Chat.as_str()).to_string(),
        })
    }
}
