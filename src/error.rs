use crate::repositories::RepositoryError;
use crate::services::{AccountServiceError, InfluencerServiceError, UploadError};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors as seen at the HTTP boundary. Each request fails on its own; nothing
/// here is retried or fatal to the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username or email already exists")]
    DuplicateKey,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid influencer ID")]
    InvalidId,

    #[error("Influencer not found")]
    NotFound,

    /// Request body the extractors could not accept (bad JSON, wrong content
    /// type, oversized upload). Carries the status the extractor chose.
    #[error("Rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AccountServiceError> for AppError {
    fn from(err: AccountServiceError) -> Self {
        match err {
            AccountServiceError::Validation(msg) => AppError::Validation(msg),
            AccountServiceError::DuplicateKey(_) => AppError::DuplicateKey,
            AccountServiceError::InvalidCredentials => AppError::InvalidCredentials,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<InfluencerServiceError> for AppError {
    fn from(err: InfluencerServiceError) -> Self {
        match err {
            InfluencerServiceError::InvalidId => AppError::InvalidId,
            InfluencerServiceError::NotFound => AppError::NotFound,
            InfluencerServiceError::Validation(msg) => AppError::Validation(msg),
            InfluencerServiceError::RepositoryError(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::NotFound,
            RepositoryError::AlreadyExists(_) => AppError::DuplicateKey,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::BAD_REQUEST => {
                AppError::Validation(format!("Malformed form data: {}", err.body_text()))
            }
            status => AppError::Rejected {
                status,
                message: err.body_text(),
            },
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DuplicateKey => (
                StatusCode::BAD_REQUEST,
                "Username or email already exists".to_string(),
            ),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid influencer ID".to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Influencer not found".to_string()),
            AppError::Rejected { status, message } => (status, message),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::UniqueField;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::DuplicateKey, StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::InvalidId, StatusCode::BAD_REQUEST),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::Rejected {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                    message: "too big".into(),
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_duplicate_field_is_not_disclosed() {
        let err = AppError::from(AccountServiceError::DuplicateKey(UniqueField::Email));
        assert!(matches!(err, AppError::DuplicateKey));
    }
}
