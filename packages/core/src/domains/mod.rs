pub mod assignments;
pub mod auth;
pub mod organization;
pub mod users;
pub mod validation;
