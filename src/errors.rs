//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Field-level
//! validation failures are a tagged enumeration of their own so callers can
//! match on the exact rule that failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Field-level validation failures.
///
/// Every variant is safe to show to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email address is required")]
    EmailRequired,

    #[error("email address is not valid")]
    EmailInvalid,

    #[error("email address is already taken")]
    EmailTaken,

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be at least 8 characters")]
    PasswordTooShort,

    #[error("user ID is required")]
    UserIdRequired,

    #[error("title is required")]
    TitleRequired,

    #[error("description is required")]
    DescriptionRequired,

    #[error("apply at is required")]
    ApplyAtRequired,

    #[error("location ID is required")]
    LocationIdRequired,

    #[error("category ID is required")]
    CategoryIdRequired,

    #[error("benefit name is required")]
    BenefitNameRequired,

    #[error("cannot add benefit to non existent profile")]
    CompanyProfileRequired,

    #[error("cannot update non existent company benefit")]
    CompanyBenefitRequired,

    #[error("token provided is not valid")]
    PwResetInvalid,
}

impl ValidationError {
    /// Stable machine-readable code for the failed rule.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmailRequired => "EMAIL_REQUIRED",
            ValidationError::EmailInvalid => "EMAIL_INVALID",
            ValidationError::EmailTaken => "EMAIL_TAKEN",
            ValidationError::PasswordRequired => "PASSWORD_REQUIRED",
            ValidationError::PasswordTooShort => "PASSWORD_TOO_SHORT",
            ValidationError::UserIdRequired => "USER_ID_REQUIRED",
            ValidationError::TitleRequired => "TITLE_REQUIRED",
            ValidationError::DescriptionRequired => "DESCRIPTION_REQUIRED",
            ValidationError::ApplyAtRequired => "APPLY_AT_REQUIRED",
            ValidationError::LocationIdRequired => "LOCATION_ID_REQUIRED",
            ValidationError::CategoryIdRequired => "CATEGORY_ID_REQUIRED",
            ValidationError::BenefitNameRequired => "BENEFIT_NAME_REQUIRED",
            ValidationError::CompanyProfileRequired => "COMPANY_PROFILE_REQUIRED",
            ValidationError::CompanyBenefitRequired => "COMPANY_BENEFIT_REQUIRED",
            ValidationError::PwResetInvalid => "PW_RESET_INVALID",
        }
    }

    /// User-facing message with the first word capitalized.
    pub fn public_message(&self) -> String {
        let message = self.to_string();
        let mut chars = message.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => message,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("ID provided was invalid")]
    InvalidId,

    // Validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token signing error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Notification error: {0}")]
    Notification(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidId => "INVALID_ID",
            AppError::Validation(e) => e.code(),
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "SIGNING_ERROR",
            AppError::Notification(_) => "NOTIFICATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidId | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Jwt(_)
            | AppError::Notification(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.public_message(),

            // Hide details for infrastructure errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("Token signing error: {:?}", e);
                "Could not issue token".to_string()
            }
            AppError::Notification(msg) => {
                tracing::error!("Notification error: {}", msg);
                "Could not deliver notification".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Returns the validation rule that failed, if any.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            AppError::Validation(e) => Some(*e),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn notification(msg: impl Into<String>) -> Self {
        AppError::Notification(msg.into())
    }
}
