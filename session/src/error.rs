//! Session-layer error type. Engine failures (`GameError`) pass through
//! unchanged; everything else is transport/registry-specific.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game {0} not found")]
    GameNotFound(String),

    #[error(transparent)]
    Game(#[from] poker_engine::GameError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("game {0} has no open seat")]
    SeatUnavailable(String),

    #[error("malformed message: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = match &self {
            SessionError::GameNotFound(_) => StatusCode::NOT_FOUND,
            SessionError::Game(poker_engine::GameError::NotFound(_)) => StatusCode::NOT_FOUND,
            SessionError::Game(poker_engine::GameError::IllegalAction(_))
            | SessionError::Game(poker_engine::GameError::IllegalState(_)) => {
                StatusCode::BAD_REQUEST
            }
            SessionError::Game(poker_engine::GameError::CapacityExceeded(_)) => {
                StatusCode::CONFLICT
            }
            SessionError::Game(poker_engine::GameError::PrecondUnmet(_)) => {
                StatusCode::BAD_REQUEST
            }
            SessionError::Game(poker_engine::GameError::Internal(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            SessionError::Config(_) => StatusCode::BAD_REQUEST,
            SessionError::SeatUnavailable(_) => StatusCode::CONFLICT,
            SessionError::Malformed(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}
