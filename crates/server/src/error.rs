//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors.
///
/// Empty results (no candidates, no ratings) are not errors anywhere in
/// the service; the only per-request failure mode is the scoring model.
/// Errors are local to their request and never touch the shared stores.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Scoring failure: {0}")]
    Scoring(#[from] ml_client::ScoringError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Scoring(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
