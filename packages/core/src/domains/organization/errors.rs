use thiserror::Error;

use crate::common::auth::AuthError;
use crate::domains::organization::models::OrganizationStatus;
use crate::kernel::ApiError;

/// Failure of a lifecycle state change.
///
/// `MissingReason` and `InvalidTransition` are raised before the backend is
/// contacted. Backend errors are carried unchanged in `Api`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("El motivo es obligatorio para cambiar el estado.")]
    MissingReason,

    #[error("Transition {from} -> {to} is not allowed")]
    InvalidTransition {
        from: OrganizationStatus,
        to: OrganizationStatus,
    },

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Requested state {requested} but backend reports {actual}")]
    StateMismatch {
        requested: OrganizationStatus,
        actual: OrganizationStatus,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LifecycleError {
    /// True when the request was refused locally, without a backend call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            LifecycleError::MissingReason
                | LifecycleError::InvalidTransition { .. }
                | LifecycleError::Unauthorized(_)
        )
    }
}
