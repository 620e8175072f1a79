pub mod login;
pub mod session;

pub use login::*;
pub use session::*;
