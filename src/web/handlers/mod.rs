//! API handlers.

pub mod admin;
pub mod auth;
pub mod board;
pub mod site;

pub use admin::*;
pub use auth::*;
pub use board::*;
pub use site::*;
