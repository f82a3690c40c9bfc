// ============================================================
// Layer 1 - HTTP Errors
// ============================================================
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Everything that can go wrong while answering `POST /predict`.
///
/// Input problems are the caller's to fix (400); a model failure
/// is ours (500). Either way the body is `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("malformed request body: {reason}")]
    MalformedBody { reason: String },

    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("prediction failed: {cause}")]
    Model { cause: String },
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::MalformedBody { .. }
            | PredictError::MissingField { .. }
            | PredictError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            PredictError::Model { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), "{}", self);
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
