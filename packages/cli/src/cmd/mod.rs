pub mod assignments;
pub mod audit;
pub mod auth;
pub mod orgs;
pub mod validate;
