//! Post and reply models.

use chrono::{DateTime, Utc};

use super::types::{Category, PostStatus};

/// A community board submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Post ID assigned by the backend. Negative for local-only posts.
    pub id: i64,
    /// Author display name.
    pub author: String,
    /// Post category.
    pub category: Category,
    /// Post body. Untrusted; escape before embedding in markup.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether this post only exists in process memory.
    pub fn is_local_only(&self) -> bool {
        self.id < 0
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Author display name.
    pub author: String,
    /// Post category.
    pub category: Category,
    /// Post body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(author: impl Into<String>, category: Category, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            category,
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Materialize as a post with the given ID.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            author: self.author,
            category: self.category,
            body: self.body,
            created_at: self.created_at,
        }
    }
}

/// An admin reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// ID of the post this reply answers.
    pub post_id: i64,
    /// Reply body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new reply.
#[derive(Debug, Clone)]
pub struct NewReply {
    /// ID of the post to answer.
    pub post_id: i64,
    /// Reply body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewReply {
    /// Create a new reply stamped with the current time.
    pub fn new(post_id: i64, body: impl Into<String>) -> Self {
        Self {
            post_id,
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A post together with its replies in ascending time order, as returned
/// by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// The post.
    pub post: Post,
    /// Replies, oldest first.
    pub replies: Vec<Reply>,
}

impl PostRecord {
    /// Wrap a post that has no replies.
    pub fn without_replies(post: Post) -> Self {
        Self {
            post,
            replies: Vec::new(),
        }
    }

    /// Derived status of the post.
    pub fn status(&self) -> PostStatus {
        PostStatus::derive(self.post.category, self.replies.len())
    }
}
