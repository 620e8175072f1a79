use thiserror::Error;

use crate::common::auth::AuthError;
use crate::domains::validation::FieldErrors;

/// Error surfaced by the backend API collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 400 / 422
    #[error("Validation error: {0}")]
    Validation(String),

    /// 401
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// 403
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 423
    #[error("Account locked: {0}")]
    Locked(String),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-2xx HTTP status and the backend's message to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => ApiError::Validation(message),
            401 => ApiError::Unauthenticated(message),
            403 => ApiError::PermissionDenied(message),
            404 => ApiError::NotFound(message),
            423 => ApiError::Locked(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// HTTP status this error stands for, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(400),
            ApiError::Unauthenticated(_) => Some(401),
            ApiError::PermissionDenied(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Locked(_) => Some(423),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Parse(_) | ApiError::Config(_) => None,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ApiError::PermissionDenied(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Failure of a registration form submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form was not sent.
    #[error("Form has errors: {0}")]
    Invalid(#[from] FieldErrors),

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Credential store error: {0}")]
    Storage(String),
}
