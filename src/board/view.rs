//! Board view model.
//!
//! Turns gateway records into what the page renders: per-post status,
//! display timestamps, escaped markup and summary counts. Everything here
//! is pure; the current time and display timezone are passed in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::post::{PostRecord, Reply};
use super::types::{Category, PostStatus};
use crate::datetime::{format_relative, to_storage};

/// Escape untrusted text for embedding in markup, keeping line breaks.
pub fn render_markup(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(|line| html_escape::encode_safe(line).into_owned())
        .collect::<Vec<_>>()
        .join("<br>")
}

/// A reply ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyView {
    /// Raw reply body.
    pub body: String,
    /// Escaped body with `<br>` line breaks.
    pub body_html: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Human-readable creation time.
    pub created_display: String,
}

/// A post ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i64,
    pub author: String,
    pub category: Category,
    pub category_label: &'static str,
    pub body: String,
    pub body_html: String,
    pub created_at: String,
    pub created_display: String,
    pub status: PostStatus,
    pub status_label: Option<&'static str>,
    pub replies: Vec<ReplyView>,
    /// Accepted while the backend was unreachable; not yet durable.
    pub local_only: bool,
}

/// Summary counts shown above the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub questions: usize,
    pub ideas: usize,
    pub waiting: usize,
}

/// The composed board.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardView {
    pub posts: Vec<PostView>,
    pub stats: BoardStats,
}

fn reply_view(reply: &Reply, now: &DateTime<Utc>, timezone: &str) -> ReplyView {
    ReplyView {
        body: reply.body.clone(),
        body_html: render_markup(&reply.body),
        created_at: to_storage(&reply.created_at),
        created_display: format_relative(&reply.created_at, now, timezone),
    }
}

fn post_view(record: &PostRecord, now: &DateTime<Utc>, timezone: &str) -> PostView {
    let post = &record.post;
    let status = record.status();

    PostView {
        id: post.id,
        author: post.author.clone(),
        category: post.category,
        category_label: post.category.as_str(),
        body: post.body.clone(),
        body_html: render_markup(&post.body),
        created_at: to_storage(&post.created_at),
        created_display: format_relative(&post.created_at, now, timezone),
        status,
        status_label: status.label(),
        replies: record
            .replies
            .iter()
            .map(|r| reply_view(r, now, timezone))
            .collect(),
        local_only: post.is_local_only(),
    }
}

/// Count posts by category and status.
pub fn compute_stats(records: &[PostRecord]) -> BoardStats {
    records.iter().fold(BoardStats::default(), |mut stats, r| {
        stats.total += 1;
        match r.post.category {
            Category::Question => stats.questions += 1,
            Category::Idea => stats.ideas += 1,
            Category::InfoShare | Category::Other => {}
        }
        if r.status() == PostStatus::Waiting {
            stats.waiting += 1;
        }
        stats
    })
}

/// Build the board view. Input order is preserved.
pub fn build_view_model(records: &[PostRecord], now: &DateTime<Utc>, timezone: &str) -> BoardView {
    BoardView {
        posts: records
            .iter()
            .map(|r| post_view(r, now, timezone))
            .collect(),
        stats: compute_stats(records),
    }
}
