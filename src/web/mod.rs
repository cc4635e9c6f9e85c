//! JSON API over HTTP.
//!
//! Handlers are thin: they extract the caller's session, call the
//! [`BoardController`](crate::controller::BoardController) and map its
//! errors onto status codes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
