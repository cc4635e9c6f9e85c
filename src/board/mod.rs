//! Community board module.
//!
//! This module provides the board's data model and view composition:
//! - Post and reply models
//! - Categories and derived post status
//! - The view model rendered by the page, with summary counts

mod post;
mod types;
mod view;

pub use post::{NewPost, NewReply, Post, PostRecord, Reply};
pub use types::{Category, PostStatus};
pub use view::{
    build_view_model, compute_stats, render_markup, BoardStats, BoardView, PostView, ReplyView,
};
