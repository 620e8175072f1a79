// Assignments domain - which professional looks after which patient
//
// Organization admins create, deactivate and delete assignments.
// Professionals can read them but not change them.

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;

pub use data::*;
pub use errors::AssignmentError;
pub use models::*;
