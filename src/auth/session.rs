//! Session context and the bearer-token session table.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

/// Authorization level of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Anonymous,
    Admin,
}

/// One client's interactive session. Starts anonymous.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4), also the bearer token.
    pub id: String,
    /// Short id for log lines, unrelated to the token.
    pub log_id: String,
    /// Current role.
    pub role: Role,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    last_activity: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a fresh anonymous session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            log_id: Uuid::new_v4().simple().to_string()[..8].to_string(),
            role: Role::Anonymous,
            created_at: Utc::now(),
            last_activity: Instant::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check if the session has been idle too long.
    pub fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_activity.elapsed() >= idle_timeout
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Sessions by bearer token, with idle expiry.
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
    idle_timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT_SECS)
    }
}

impl SessionManager {
    /// Create a manager with the given idle timeout.
    pub fn new(idle_timeout_secs: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Store a session and return its token.
    pub fn insert(&mut self, session: Session) -> String {
        let token = session.id.clone();
        self.sessions.insert(token.clone(), session);
        token
    }

    /// Look up a live session, refreshing its activity time.
    ///
    /// An idle session is dropped and `None` returned.
    pub fn get(&mut self, token: &str) -> Option<Session> {
        if self.sessions.get(token)?.is_idle(self.idle_timeout) {
            self.sessions.remove(token);
            debug!("Session expired after idle timeout");
            return None;
        }

        let session = self.sessions.get_mut(token)?;
        session.touch();
        Some(session.clone())
    }

    /// Replace the stored state of an existing session.
    pub fn update(&mut self, session: &Session) -> bool {
        match self.sessions.get_mut(&session.id) {
            Some(stored) => {
                *stored = session.clone();
                stored.touch();
                true
            }
            None => false,
        }
    }

    /// Drop a session.
    pub fn remove(&mut self, token: &str) -> Option<Session> {
        self.sessions.remove(token)
    }

    /// Drop idle sessions. Returns how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let idle_timeout = self.idle_timeout;
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_idle(idle_timeout));
        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed, "Pruned idle sessions");
        }
        removed
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert_eq!(session.role, Role::Anonymous);
        assert!(!session.is_admin());
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[test]
    fn test_log_id_not_taken_from_token() {
        for _ in 0..16 {
            let session = Session::new();
            assert_eq!(session.log_id.len(), 8);
            assert!(!session.id.replace('-', "").contains(&session.log_id));
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut manager = SessionManager::default();
        let mut session = Session::new();
        session.role = Role::Admin;
        let token = manager.insert(session);

        let found = manager.get(&token).unwrap();
        assert!(found.is_admin());
        assert!(manager.get("missing").is_none());
    }

    #[test]
    fn test_idle_session_expires() {
        let mut manager = SessionManager::new(0);
        let token = manager.insert(Session::new());

        assert!(manager.get(&token).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let mut manager = SessionManager::default();
        let mut session = Session::new();
        let token = manager.insert(session.clone());

        session.role = Role::Admin;
        assert!(manager.update(&session));
        assert!(manager.get(&token).unwrap().is_admin());

        assert!(manager.remove(&token).is_some());
        assert!(!manager.update(&session));
    }

    #[test]
    fn test_cleanup() {
        let mut manager = SessionManager::new(0);
        manager.insert(Session::new());
        manager.insert(Session::new());
        assert_eq!(manager.cleanup(), 2);
        assert_eq!(manager.len(), 0);
    }
}
