pub mod audit;
pub mod organization;

pub use audit::*;
pub use organization::*;
