//! Error handling middleware - RFC 7807 compliant responses.

use std::fmt;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use blogpost_core::error::{DomainError, RepoError};
use blogpost_shared::{ErrorResponse, FieldErrors};

use crate::observability::current_request_id;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    Validation(FieldErrors),
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// Illegal lifecycle transition. Reported as 400.
    Conflict(String),
    TooManyRequests { retry_after_secs: u64 },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                write!(f, "Validation failed: {}", fields.join(", "))
            }
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::TooManyRequests { retry_after_secs } => {
                write!(f, "Too many requests, retry after {}s", retry_after_secs)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Conflict(detail) => ErrorResponse::new(400, "Conflict").with_detail(detail),
            AppError::TooManyRequests { retry_after_secs } => {
                ErrorResponse::too_many_requests(*retry_after_secs)
            }
            AppError::Internal(detail) => {
                // Log internal errors; the cause stays out of the body
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let error = match current_request_id() {
            Some(request_id) => error.with_request_id(request_id),
            None => error,
        };

        let mut response = HttpResponse::build(self.status_code());
        if let AppError::TooManyRequests { retry_after_secs } = self {
            response.insert_header(("Retry-After", retry_after_secs.to_string()));
        }
        response.json(error)
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Unauthorized => AppError::Unauthorized("Access denied".to_string()),
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                AppError::Internal(format!("Database connection error: {}", msg))
            }
            RepoError::Query(msg) => AppError::Internal(format!("Database query error: {}", msg)),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

// Extractor failures get the same body as every other 400.

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid query string: {}", err)).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
    })
}

/// Fallback for routes that match nothing.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Not found".to_string()))
}
