//! Token service error types.
//!
//! Every error maps to an HTTP status via the `IntoResponse` impl. Response
//! bodies are short plain-text messages; internal detail is logged
//! server-side and never returned to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned when `user_id` is absent or empty.
pub const MISSING_IDENTIFIER_MESSAGE: &str = "user_id is required";

/// Body returned when the token could not be produced.
pub const SIGNING_FAILED_MESSAGE: &str = "Failed to generate token";

#[derive(Debug, Error)]
pub enum TiError {
    #[error("Missing identifier")]
    MissingIdentifier,

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl TiError {
    /// Returns the HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> StatusCode {
        match self {
            TiError::MissingIdentifier => StatusCode::BAD_REQUEST,
            TiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            TiError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            TiError::MissingIdentifier => MISSING_IDENTIFIER_MESSAGE,
            TiError::Signing(detail) => {
                tracing::error!(target: "ti.crypto", error = %detail, "Token signing failed");
                SIGNING_FAILED_MESSAGE
            }
            TiError::InvalidToken(_) => "The token is invalid or expired",
        };

        (status, message).into_response()
    }
}
