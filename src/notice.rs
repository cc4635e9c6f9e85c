//! Admin notices shown above the board.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notice severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    /// Ordinary announcement.
    #[default]
    Normal,
    /// Highlighted announcement.
    Important,
    /// Shown first, in alarm colours.
    Urgent,
}

impl NoticeSeverity {
    /// Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            NoticeSeverity::Normal => "일반",
            NoticeSeverity::Important => "중요",
            NoticeSeverity::Urgent => "긴급",
        }
    }
}

impl fmt::Display for NoticeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NoticeSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "일반" => Ok(NoticeSeverity::Normal),
            "important" | "중요" => Ok(NoticeSeverity::Important),
            "urgent" | "긴급" => Ok(NoticeSeverity::Urgent),
            other => Err(format!("unknown notice severity: {other}")),
        }
    }
}

/// An admin-published banner message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub severity: NoticeSeverity,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The list of live notices.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notice and return it.
    pub fn publish(&mut self, severity: NoticeSeverity, content: impl Into<String>) -> Notice {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            severity,
            content: content.into(),
            created_at: Utc::now(),
        };
        self.notices.push(notice.clone());
        notice
    }

    /// Remove a notice. Returns `None` if the id is unknown.
    pub fn retract(&mut self, id: u64) -> Option<Notice> {
        let index = self.notices.iter().position(|n| n.id == id)?;
        Some(self.notices.remove(index))
    }

    /// Live notices, newest first.
    pub fn list(&self) -> Vec<Notice> {
        self.notices.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
