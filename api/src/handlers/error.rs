//! Mapping of domain and request errors onto HTTP responses

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use validator::ValidationErrors;

use ps_core::errors::DomainError;
use ps_shared::errors::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Errors returned by handlers and the session gate
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, invalid or expired session
    #[error("Authentication required")]
    Unauthorized,

    /// Body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    /// Body parsed but failed field validation
    #[error("Request validation failed")]
    Validation(#[from] ValidationErrors),

    /// Domain-level input rejection
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    /// Profile store failure; the message is passed through
    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound("The requested resource was not found".to_string())
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => error_codes::UNAUTHORIZED,
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::Validation(_) | ApiError::InvalidInput(_) => error_codes::VALIDATION_ERROR,
            ApiError::NotFound(_) => error_codes::NOT_FOUND,
            ApiError::Storage(_) => error_codes::STORAGE_ERROR,
            ApiError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::Validation(_) | ApiError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Internal(detail) => {
                log::error!("Internal error: {}", detail);
                "An internal error occurred".to_string()
            }
            ApiError::Storage(detail) => {
                log::error!("Storage error: {}", detail);
                detail.clone()
            }
            other => other.to_string(),
        };

        let mut body = ErrorResponse::new(self.error_code(), message);
        if let ApiError::Validation(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
                body = body.add_detail(field.to_string(), codes);
            }
        }

        body.to_response(self.status_code())
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Token(token_error) => {
                log::debug!("Authentication failed: {} ({})", token_error, token_error.error_code());
                ApiError::Unauthorized
            }
            DomainError::Validation { message } => ApiError::InvalidInput(message),
            DomainError::Storage { message } => ApiError::Storage(message),
            DomainError::Internal { message } => ApiError::Internal(message),
        }
    }
}

/// Renders JSON extractor failures as `400 BAD_REQUEST`
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {}", error);
    ApiError::BadRequest(format!("Invalid request body: {}", error)).into()
}
