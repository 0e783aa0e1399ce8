//! Data models

pub mod result;
pub mod upload;
pub mod user;

pub use result::*;
pub use upload::*;
pub use user::*;
