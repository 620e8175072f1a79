//! Kernel module - collaborator traits and dependencies.

pub mod deps;
pub mod errors;
pub mod test_dependencies;
pub mod traits;

pub use deps::ClientDeps;
pub use errors::{ApiError, SubmitError};
pub use traits::*;
