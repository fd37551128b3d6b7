//! Error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Todo {0} not found")]
    NotFound(u64),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    /// Failure switch is on
    #[error("Simulated server failure")]
    Unavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::debug!(%status, "{}", self);

        // json-server answers misses with an empty object
        let body = match self {
            Self::NotFound(_) => json!({}),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
