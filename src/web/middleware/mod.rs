//! Middleware for Web API.

pub mod auth;
pub mod cors;

pub use auth::{bearer_token, CurrentSession};
pub use cors::create_cors_layer;
