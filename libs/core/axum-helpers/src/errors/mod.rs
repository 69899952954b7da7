pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::validation::ValidationErrors;

/// Body of every non-validation error response.
///
/// ```json
/// { "error": "Producto No Encontrado", "code": "NOT_FOUND" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error: error.into(),
            code: Some(code),
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code.default_message(), code)
    }
}

/// Application error that renders as a JSON response.
///
/// Domain crates convert their own errors into this type so every route
/// shares one body shape and one logging policy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AppError::Validation(errors) => return errors.into_response(),
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                let status = match &e {
                    JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.body_text(), ErrorCode::JsonExtraction)
            }
            AppError::BadRequest(message) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", message);
                (StatusCode::BAD_REQUEST, message, ErrorCode::BadRequest)
            }
            AppError::NotFound(message) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", message);
                (StatusCode::NOT_FOUND, message, ErrorCode::NotFound)
            }
            AppError::ServiceUnavailable(message) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    message
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    message,
                    ErrorCode::ServiceUnavailable,
                )
            }
            AppError::InternalServerError(message) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    message
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    ErrorCode::InternalError,
                )
            }
        };

        (status, Json(ErrorResponse::new(message, code))).into_response()
    }
}

/// Storage faults never leak driver text to the client.
fn map_db_error(e: &DbErr) -> (StatusCode, String, ErrorCode) {
    let code = match e {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseUnavailable.code(),
                "Database unavailable: {:?}",
                e
            );
            ErrorCode::DatabaseUnavailable
        }
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            tracing::warn!(
                error_code = ErrorCode::DatabaseNotFound.code(),
                "Database record missing: {:?}",
                e
            );
            ErrorCode::DatabaseNotFound
        }
        _ => {
            tracing::error!(
                error_code = ErrorCode::DatabaseError.code(),
                "Database error: {:?}",
                e
            );
            ErrorCode::DatabaseError
        }
    };

    (code.status(), code.default_message().to_string(), code)
}
