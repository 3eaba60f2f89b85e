// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const PAYMENT_REQUIRED_MESSAGE: &str = "Please add credits to continue using AI features.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "AI gateway error";

/// Failures of a single dispatch.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("AI gateway API key is not configured")]
    MissingCredential,
    #[error("rate limited by AI gateway")]
    RateLimited,
    #[error("AI gateway requires payment or credits")]
    PaymentRequired,
    #[error("AI gateway returned http {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid AI gateway response: {0}")]
    InvalidResponse(String),
}

impl DispatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingCredential => self.to_string(),
            Self::RateLimited => RATE_LIMITED_MESSAGE.to_string(),
            Self::PaymentRequired => PAYMENT_REQUIRED_MESSAGE.to_string(),
            Self::Upstream { .. } | Self::Transport(_) | Self::InvalidResponse(_) => UPSTREAM_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Dispatch(err) => (err.status_code(), err.public_message()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
