use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::warn;

use crate::{
    error::AppError,
    message::{DispatchRequest, DispatchResult},
    state::SharedState,
};

pub async fn assistant_handler(
    State(state): State<SharedState>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> Result<Json<DispatchResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected AI request body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let result = state.dispatcher.dispatch(&request).await?;
    Ok(Json(result))
}
