use crate::domains::organization::errors::LifecycleError;
use crate::domains::organization::models::{AuditAction, Organization, OrganizationStatus};

/// A state change that passed the local checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrganizationStatus,
    pub to: OrganizationStatus,
    /// Audit action the backend records for this change.
    pub action: AuditAction,
}

/// Organization lifecycle rules
/// Pure decision logic - NO IO, only state transitions
pub struct OrganizationLifecycle;

impl OrganizationLifecycle {
    /// Check a proposed change of `estado`.
    ///
    /// A blank reason is refused before the transition table is consulted.
    pub fn decide(
        current: OrganizationStatus,
        target: OrganizationStatus,
        reason: &str,
    ) -> Result<Transition, LifecycleError> {
        if reason.trim().is_empty() {
            return Err(LifecycleError::MissingReason);
        }

        if !current.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        Ok(Transition {
            from: current,
            to: target,
            action: AuditAction::for_status_change(target),
        })
    }

    /// A success response only counts if the backend landed on the target.
    pub fn confirm(transition: &Transition, updated: &Organization) -> Result<(), LifecycleError> {
        if updated.estado != transition.to {
            return Err(LifecycleError::StateMismatch {
                requested: transition.to,
                actual: updated.estado,
            });
        }
        Ok(())
    }
}
