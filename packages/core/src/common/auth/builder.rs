use super::{has_capability, AuthError, Capability, Role};

/// Entry point for capability checks
///
/// Usage:
/// ```
/// use alma_core::common::auth::{Actor, Capability, Role};
///
/// Actor::new("admin@hospital.es", Role::AdminOrganizacion)
///     .can(Capability::RegisterStaff)
///     .check()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    email: String,
    role: Role,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `email` - Session email, used for logging only
    /// * `role` - Role stored with the session token at login
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(&self, capability: Capability) -> CapabilityBuilder<'_> {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder<'a> {
    actor: &'a Actor,
    capability: Capability,
}

impl CapabilityBuilder<'_> {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if has_capability(self.actor.role, self.capability) {
            return Ok(());
        }

        tracing::debug!(
            email = %self.actor.email,
            role = %self.actor.role,
            capability = %self.capability,
            "Capability check failed"
        );

        Err(AuthError::PermissionDenied {
            role: self.actor.role,
            capability: self.capability,
        })
    }
}
