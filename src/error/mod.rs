//! Application error types and their JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Application-level errors.
///
/// Client errors render as `{ "message" }`; server errors render as `{ "message", "error" }`
/// with the underlying cause in `error`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Unknown email and wrong password collapse into this one variant.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Error encrypting password: {0}")]
    Hashing(String),

    /// Any store failure while registering, duplicate email included.
    #[error("Error registering user: {0}")]
    Registration(StoreError),

    #[error("Error logging in: {0}")]
    Lookup(StoreError),

    #[error("Error issuing token: {0}")]
    TokenIssue(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Hashing(_)
            | AppError::Registration(_)
            | AppError::Lookup(_)
            | AppError::TokenIssue(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(msg) => json!({ "message": msg }),
            AppError::InvalidCredentials => json!({ "message": INVALID_CREDENTIALS }),
            AppError::Unauthorized(msg) => json!({ "message": msg }),
            AppError::Hashing(e) => json!({ "message": "Error encrypting password", "error": e }),
            AppError::Registration(e) => {
                json!({ "message": "Error registering user", "error": e.to_string() })
            }
            AppError::Lookup(e) => json!({ "message": "Error logging in", "error": e.to_string() }),
            AppError::TokenIssue(e) => json!({ "message": "Error issuing token", "error": e }),
            AppError::Internal(e) => json!({ "message": "Internal error", "error": e.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
