// Auth domain - login, logout, organization signup and password change
//
// The session (token, email, role, temporary-password flag) lives in the
// credential store. The role read back from it is what capability checks run
// against before any gated request is sent.

pub mod actions;
pub mod data;
pub mod models;

pub use data::*;
pub use models::*;
