use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Wire representation of an error: stable machine code plus human message.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error kinds surfaced to API callers.
///
/// Cache failures never appear here: the cache layer absorbs its own errors
/// and degrades to a miss (see [`crate::infrastructure::cache`]).
#[derive(Debug)]
pub enum AppError {
    /// Malformed input (bad URL, bad alias, bad pagination, ...). 400.
    Validation { message: String, details: Value },
    /// A custom alias collides with an active short code. 400.
    CodeInUse { message: String, details: Value },
    /// Unknown short code, or no link matches a searched URL. 404.
    NotFound { message: String, details: Value },
    /// The code exists but its expiry has passed. 404, distinguished from
    /// `NotFound` by the error code so callers can tell the cases apart.
    Expired { message: String, details: Value },
    /// Unexpected failure (e.g. code generation exhausted its retries). 500.
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn code_in_use(message: impl Into<String>, details: Value) -> Self {
        Self::CodeInUse {
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
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::CodeInUse { message, details } => {
                (StatusCode::BAD_REQUEST, "code_in_use", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Expired { message, details } => {
                (StatusCode::NOT_FOUND, "expired", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// Converts into the wire representation without building a response.
    pub fn to_error_info(self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AppError::Validation { message, .. }
            | AppError::CodeInUse { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Expired { message, .. }
            | AppError::Internal { message, .. } => message,
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": errors.to_string() }),
        )
    }
}
