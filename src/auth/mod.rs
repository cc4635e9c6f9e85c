//! Authentication module.
//!
//! This module provides admin secret hashing, the access gate that
//! elevates a session to admin, and the session table used by the web
//! layer.

mod gate;
mod password;
mod session;

pub use gate::AccessGate;
pub use password::{hash_secret, is_phc_hash, verify_secret, SecretError};
pub use session::{Role, Session, SessionManager, DEFAULT_IDLE_TIMEOUT_SECS};
