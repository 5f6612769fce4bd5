//! Application error type and its JSON rendering.
//!
//! Both public endpoints answer `200 OK` for every outcome and report failures
//! in the body as `{"success": false, "error": "<message>"}`; callers tell
//! success from failure by the shape of the body.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// Failure envelope shared by all legacy endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body is not JSON, or is an empty/falsy JSON value.
    #[error("Invalid JSON")]
    InvalidJson,

    /// A single record failed structural or field validation.
    #[error("{message}")]
    Validation { message: String },

    /// The store could not be reached (pool timeout, refused connection, TLS, ...).
    #[error("{message}")]
    Connection { message: String },

    /// The store was reached but rejected or failed a statement.
    #[error("{message}")]
    Database { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Returns true when the store itself is unreachable.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Connection { message } => {
                tracing::error!(error = %message, "Store connection failed");
            }
            AppError::Database { message } => {
                tracing::error!(error = %message, "Database error");
            }
            AppError::InvalidJson | AppError::Validation { .. } => {
                tracing::debug!(error = %self, "Rejected request input");
            }
        }

        (StatusCode::OK, Json(self.to_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(
            e,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Configuration(_)
        ) {
            return AppError::connection(e.to_string());
        }

        AppError::database(e.to_string())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::bad_request("Request body too large");
        }

        AppError::bad_request(rejection.body_text())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::bad_request(e.to_string())
    }
}
