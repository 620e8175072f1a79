use thiserror::Error;

use super::{Capability, Role};

/// Authorization errors raised before a request leaves the client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Permission denied: {role} cannot {capability}")]
    PermissionDenied { role: Role, capability: Capability },

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
