//! Mapping of catalog errors to HTTP responses
//!
//! Caller-facing kinds keep their message. Internal failures are logged in
//! full and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::Error;

/// Message returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str =
    "An internal server error occurred while processing your request.";

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::PerformerNotFound(_) | Error::NoPerformerAvailable => StatusCode::NOT_FOUND,
            Error::Database(_) | Error::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_internal() {
            error!("Request failed: {}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
