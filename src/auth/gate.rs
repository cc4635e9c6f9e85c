//! Access gate: admin login and role checks.

use tracing::{info, warn};

use super::password::{hash_secret, is_phc_hash, verify_secret};
use super::session::{Role, Session};
use crate::config::AdminConfig;
use crate::{BoardError, Result};

/// Holds the hash of the configured admin secret.
///
/// The plaintext secret never leaves [`AccessGate::from_config`].
#[derive(Clone, Default)]
pub struct AccessGate {
    secret_hash: Option<String>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AccessGate {
    /// Build the gate from configuration.
    ///
    /// A pre-computed `secret_hash` wins over `secret`. With neither, admin
    /// login is disabled.
    pub fn from_config(config: &AdminConfig) -> Result<Self> {
        let hash = config.secret_hash.trim();
        if !hash.is_empty() {
            if !is_phc_hash(hash) {
                return Err(BoardError::Config(
                    "admin.secret_hash is not a valid PHC hash string".to_string(),
                ));
            }
            info!("Admin login enabled (pre-hashed secret)");
            return Ok(Self::from_hash(hash));
        }

        if !config.secret.is_empty() {
            let gate = Self::with_secret(&config.secret)?;
            info!("Admin login enabled");
            return Ok(gate);
        }

        warn!("No admin secret configured; admin login is disabled");
        Ok(Self::disabled())
    }

    /// Gate for a plaintext secret, hashed here.
    pub fn with_secret(secret: &str) -> Result<Self> {
        let hash = hash_secret(secret)
            .map_err(|e| BoardError::Config(format!("admin secret: {e}")))?;
        Ok(Self::from_hash(hash))
    }

    /// Gate for an existing PHC hash.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self {
            secret_hash: Some(hash.into()),
        }
    }

    /// Gate that refuses every login.
    pub fn disabled() -> Self {
        Self { secret_hash: None }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_hash.is_some()
    }

    /// Whether `secret` matches the configured admin secret.
    pub fn verify(&self, secret: &str) -> bool {
        match &self.secret_hash {
            Some(hash) if !secret.is_empty() => verify_secret(secret, hash).is_ok(),
            _ => false,
        }
    }

    /// Elevate `session` to admin if `secret` matches. The role is left
    /// unchanged on failure.
    pub fn attempt_login(&self, session: &mut Session, secret: &str) -> bool {
        let ok = self.verify(secret);
        Self::apply_login(session, ok);
        ok
    }

    /// Record the outcome of a verification on `session`.
    pub(crate) fn apply_login(session: &mut Session, verified: bool) {
        if verified {
            session.role = Role::Admin;
            session.touch();
            info!(session = %session.log_id, "Admin login");
        } else {
            warn!(session = %session.log_id, "Admin login failed");
        }
    }

    /// Reset `session` to anonymous.
    pub fn logout(&self, session: &mut Session) {
        if session.is_admin() {
            info!(session = %session.log_id, "Admin logout");
        }
        session.role = Role::Anonymous;
    }

    /// Refuse `action` unless `session` is admin.
    pub fn require_admin(&self, session: &Session, action: &str) -> Result<()> {
        if session.is_admin() {
            return Ok(());
        }
        warn!(action, session = %session.log_id, "Refused admin action");
        Err(BoardError::Unauthorized(format!("{action} requires admin")))
    }
}
