//! API error responses
//!
//! Every failure leaves the endpoint as `{"error": "<message>"}` with a
//! status code chosen by the error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use autoblog_core::{StoreError, ValidationError};

/// Errors returned by the article endpoint
#[derive(Error, Debug)]
pub enum ApiError {
    /// Required fields missing or payload malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The database operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Access key missing or wrong
    #[error("Unauthorized: valid access key required")]
    Unauthorized,

    /// Method not served on this route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A blocking task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Hint for the operator, when the underlying store error has one
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ApiError::Store(err) => err.recovery_suggestion(),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            match self.recovery_suggestion() {
                Some(hint) => error!(error = %message, hint, "request failed"),
                None => error!(error = %message, "request failed"),
            }
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
