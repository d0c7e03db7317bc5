//! HTTP error type and the mapping from domain failures to status codes

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use relawan_core::error::DomainError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => {
                tracing::warn!("{} ({}): {}", code, status.as_u16(), msg);
                msg
            }
            ApiError::DatabaseError(msg) | ApiError::InternalError(msg) => {
                tracing::error!("{} ({}): {}", code, status.as_u16(), msg);
                "Internal server error".to_string()
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::ValidationError(_)
            | DomainError::InvalidSkillFormat(_)
            | DomainError::UnknownSkills(_)
            | DomainError::UserHasNoSkills => ApiError::BadRequest(message),

            DomainError::UserNotFound
            | DomainError::InvalidCredentials
            | DomainError::InvalidToken => ApiError::Unauthorized(message),

            DomainError::Forbidden(_) => ApiError::Forbidden(message),

            DomainError::EventNotFound(_) | DomainError::VolunteerNotFound { .. } => {
                ApiError::NotFound(message)
            }

            DomainError::EmailAlreadyExists(_)
            | DomainError::AlreadyVolunteered { .. }
            | DomainError::ReportAlreadyExists(_)
            | DomainError::EventFull(_)
            | DomainError::EventClosed(_)
            | DomainError::VolunteerNotCompleted(_) => ApiError::Conflict(message),

            DomainError::DatabaseError(_) => ApiError::DatabaseError(message),

            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(message),
        }
    }
}

// Extractor rejections go through the same envelope as handler errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
