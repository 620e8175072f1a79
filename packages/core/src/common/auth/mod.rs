/// Authorization module for the A.L.M.A. client core
///
/// Provides a fluent API for capability checks before a gated action is
/// sent to the backend:
///
/// ```rust
/// use alma_core::common::auth::{Actor, Capability, Role};
///
/// let result = Actor::new("root@alma.es", Role::SuperAdmin)
///     .can(Capability::ChangeOrganizationState)
///     .check();
/// assert!(result.is_ok());
/// ```
///
/// The backend re-checks every capability. A passing client-side check only
/// avoids a round trip that is certain to be refused.

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::{has_capability, Capability, Role};
pub use errors::AuthError;
