//! Moderation store.
//!
//! Keeps the set of display names barred from posting. Blocking is by
//! exact name after trimming; it stops future submissions only and never
//! hides existing posts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A blocked display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedUser {
    /// Display name used as the blocking key.
    pub name: String,
    /// When the block was placed.
    pub blocked_at: DateTime<Utc>,
}

/// Registry of blocked display names.
#[derive(Debug, Default)]
pub struct ModerationStore {
    blocked: BTreeMap<String, DateTime<Utc>>,
}

fn key(name: &str) -> &str {
    name.trim()
}

impl ModerationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` may not post.
    pub fn is_blocked(&self, name: &str) -> bool {
        self.blocked.contains_key(key(name))
    }

    /// Block `name`. Returns `false` if it was already blocked or empty.
    pub fn block(&mut self, name: &str) -> bool {
        let name = key(name);
        if name.is_empty() || self.blocked.contains_key(name) {
            return false;
        }
        self.blocked.insert(name.to_string(), Utc::now());
        true
    }

    /// Unblock `name`. Returns `false` if it was not blocked.
    pub fn unblock(&mut self, name: &str) -> bool {
        self.blocked.remove(key(name)).is_some()
    }

    /// All blocked names in name order.
    pub fn list(&self) -> Vec<BlockedUser> {
        self.blocked
            .iter()
            .map(|(name, blocked_at)| BlockedUser {
                name: name.clone(),
                blocked_at: *blocked_at,
            })
            .collect()
    }

    /// Number of blocked names.
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether nobody is blocked.
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}
