use thiserror::Error;

use crate::common::auth::AuthError;
use crate::domains::validation::FieldErrors;
use crate::kernel::ApiError;

/// Failure of an assignment operation.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The request was not sent.
    #[error("Assignment has errors: {0}")]
    Invalid(#[from] FieldErrors),

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AssignmentError {
    /// True when the request was refused locally, without a backend call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AssignmentError::Invalid(_) | AssignmentError::Unauthorized(_)
        )
    }
}
