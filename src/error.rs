use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::engine::{AdjustError, RecordError};
use crate::orchestration::OrchestrationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<AdjustError> for AppError {
    fn from(err: AdjustError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<OrchestrationError> for AppError {
    fn from(err: OrchestrationError) -> Self {
        match err {
            OrchestrationError::GameNotFound(id) => AppError::NotFound(format!("game {}", id)),
            OrchestrationError::PlayerNotInGame { game_id, player_id } => AppError::NotFound(
                format!("player {} is not in game {}", player_id, game_id),
            ),
            OrchestrationError::AdjustmentInFlight { game_id, player_id } => AppError::Conflict(
                format!(
                    "an adjustment for player {} in game {} is already in progress",
                    player_id, game_id
                ),
            ),
            OrchestrationError::InvalidRequest(msg) => AppError::BadRequest(msg),
            OrchestrationError::Adjust(e) => e.into(),
            OrchestrationError::Record(e) => e.into(),
            OrchestrationError::Db(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
