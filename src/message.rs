// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body accepted by `POST /ai-assistant`.
///
/// Only the payload relevant to `kind` is read; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Older dashboard views send the tag as `type`; `kind` wins when both are present.
    #[serde(default, rename = "type", deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub post_data: Option<PostData>,
    #[serde(default)]
    pub lead_data: Option<LeadData>,
    #[serde(default)]
    pub record_data: Option<RecordData>,
    #[serde(default)]
    pub business_data: Option<BusinessData>,
    #[serde(default)]
    pub business_context: Option<BusinessContext>,
    #[serde(default)]
    pub message_data: Option<MessageData>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl DispatchRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// The tag the request was sent with, from `kind` or else `type`.
    pub fn tag(&self) -> Option<&str> {
        self.kind.as_deref().or(self.type_tag.as_deref())
    }

    /// The prompt if it carries any non-whitespace text.
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub topic: String,
    pub platform: String,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadData {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordData {
    #[serde(rename = "type")]
    pub record_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessData {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub target_audience: Option<String>,
}

/// Business profile the dashboard keeps in its settings page.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// An inbound social media message (DM, comment, mention).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    #[serde(default)]
    pub content: Option<String>,
    pub platform: String,
    #[serde(default)]
    pub contact_name: Option<String>,
}

/// A prior turn supplied by the client. System turns are not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DispatchResult {
    pub content: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Non-string tags are treated as absent so they fall back like unknown ones.
fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => Some(tag),
        _ => None,
    })
}
