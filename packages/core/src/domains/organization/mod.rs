// Organization domain - registration and operational lifecycle
//
// Responsibilities:
// - Organization registration form checks and submission
// - State changes (ACTIVA / SUSPENDIDA / BAJA), each with a mandatory reason
// - Audit log reads
//
// Persistence and the audit trail are owned by the backend. This side only
// proposes transitions and renders the result.

pub mod actions;
pub mod data;
pub mod errors;
pub mod machines;
pub mod models;

pub use errors::LifecycleError;
pub use models::*;
