//! Application error type and its HTTP representation.
//!
//! Every failure on the synchronous request path ends up as an [`AppError`],
//! which renders as a JSON body of the form:
//!
//! ```json
//! { "detail": "Requested url not found", "code": "not_found" }
//! ```
//!
//! Cache failures never reach this type; see
//! [`crate::infrastructure::cache::CacheError`].

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

/// Errors surfaced by services, repositories and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: bad URL, alias out of bounds, unparsable body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The alias has no mapping in the cache or the durable store.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The requested or generated alias is already taken.
    #[error("Alias '{alias}' already exists.")]
    AliasConflict { alias: String },

    /// Missing or mismatching bearer token on a protected endpoint.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// The durable store is unreachable or failed unexpectedly.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn alias_conflict(alias: impl Into<String>) -> Self {
        Self::AliasConflict {
            alias: alias.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Whether a retry of the same operation may succeed.
    ///
    /// Only storage faults are transient; a conflict or a validation failure
    /// stays a failure no matter how often it is repeated.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::AliasConflict { .. } => (StatusCode::CONFLICT, "alias_conflict"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (detail, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Internal { message, details } => (message, details),
            err @ AppError::AliasConflict { .. } => (err.to_string(), Value::Null),
            AppError::Storage(reason) => {
                tracing::error!("Storage failure on request path: {}", reason);
                ("Storage unavailable".to_string(), Value::Null)
            }
        };

        let body = ErrorBody {
            detail,
            code,
            details,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::storage(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({}))
    }
}
