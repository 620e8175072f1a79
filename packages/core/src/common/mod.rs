// Common types shared across the domains

pub mod auth;
pub mod entity_ids;
pub mod id;

pub use auth::{Actor, AuthError, Capability, Role};
pub use entity_ids::{
    AssignmentId, AuditRecordId, OrganizationId, PatientId, ProfessionalId, UserId,
};
pub use id::Id;
