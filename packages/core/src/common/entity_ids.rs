//! Typed ID definitions for backend entities.
//!
//! ```rust
//! use alma_core::common::{AuditRecordId, OrganizationId};
//!
//! let org_id = OrganizationId::from_raw(1);
//! let audit_id = AuditRecordId::from_raw(1);
//!
//! // Same raw value, incompatible types:
//! // let wrong: OrganizationId = audit_id;
//! # let _ = (org_id, audit_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Organization entities.
pub struct Organization;

/// Marker type for audit log entries.
pub struct AuditRecord;

/// Marker type for User accounts (any role).
pub struct User;

/// Marker type for patient profiles. Distinct from the patient's user id.
pub struct Patient;

/// Marker type for professional profiles.
pub struct Professional;

/// Marker type for professional-patient assignments.
pub struct Assignment;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Organization entities.
pub type OrganizationId = Id<Organization>;

/// Typed ID for audit log entries.
pub type AuditRecordId = Id<AuditRecord>;

/// Typed ID for User accounts.
pub type UserId = Id<User>;

/// Typed ID for patient profiles.
pub type PatientId = Id<Patient>;

/// Typed ID for professional profiles.
pub type ProfessionalId = Id<Professional>;

/// Typed ID for assignments.
pub type AssignmentId = Id<Assignment>;
