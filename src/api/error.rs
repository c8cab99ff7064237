//! Error replies for the HTTP endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error::ClientError;

/// Why an endpoint could not produce its success reply.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was unusable or lacked a required field.
    #[error("{0}")]
    Validation(String),

    /// An outbound call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Client(err) => err.kind(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation(message) => tracing::debug!(error = %message, "Rejected request"),
            Self::Client(err) => tracing::error!(
                error = %err,
                kind = err.kind(),
                retryable = err.is_retryable(),
                "Outbound call failed"
            ),
        }
        // Every failure is reported as 500, including bad input.
        let body = ErrorBody {
            kind: self.kind(),
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
