// Users domain - staff registration by organization admins
//
// Patients and professionals are created inside the admin's organization.
// The backend infers the organization from the admin's token.

pub mod actions;
pub mod data;
pub mod models;

pub use data::*;
pub use models::*;
