//! Typed parsing for replies that are JSON by convention (lead scores, SWOT, schedules, extracted leads).
//!
//! The dispatcher never parses replies. Callers that want structure use these
//! helpers and get an explicit error when the model ignored the format.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructuredReplyError {
    #[error("reply is not the expected JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Parse a reply, tolerating a surrounding Markdown code fence.
pub fn parse_reply<T: DeserializeOwned>(content: &str) -> Result<T, StructuredReplyError> {
    Ok(serde_json::from_str(strip_code_fence(content))?)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) on the opening line.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    pub score: u8,
    pub reason: String,
    pub priority: Priority,
}

impl LeadScore {
    pub fn parse(content: &str) -> Result<Self, StructuredReplyError> {
        #[derive(Deserialize)]
        struct Raw {
            score: f64,
            reason: String,
            priority: Priority,
        }

        let raw: Raw = parse_reply(content)?;
        let score = raw.score.round() as i64;
        if !(0..=100).contains(&score) {
            return Err(StructuredReplyError::OutOfRange { field: "score", value: score });
        }

        Ok(Self {
            score: score as u8,
            reason: raw.reason,
            priority: raw.priority,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwotAnalysis {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

impl SwotAnalysis {
    pub fn parse(content: &str) -> Result<Self, StructuredReplyError> {
        parse_reply(content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingSchedule {
    pub times: Vec<String>,
    pub days: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

impl PostingSchedule {
    pub fn parse(content: &str) -> Result<Self, StructuredReplyError> {
        parse_reply(content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedLead {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub intent: Option<Priority>,
}

impl ExtractedLead {
    pub fn parse(content: &str) -> Result<Self, StructuredReplyError> {
        parse_reply(content)
    }
}
