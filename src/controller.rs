//! Board controller.
//!
//! Entry point for every board operation. Input and policy checks run
//! first; only then is the persistence gateway called. Gateway failures
//! never escape [`BoardController::fetch_board`] and turn a failed
//! submission into a local-only post instead of losing it.
//!
//! The moderation list, notices and local fallback posts are owned here
//! and shared by every session of the process. Only the role lives in the
//! [`Session`] passed to each call.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::auth::{AccessGate, Session};
use crate::board::{
    build_view_model, BoardStats, BoardView, Category, NewPost, NewReply, PostRecord, Reply,
};
use crate::moderation::{BlockedUser, ModerationStore};
use crate::notice::{Notice, NoticeBoard, NoticeSeverity};
use crate::store::{BoardStore, ReadCache};
use crate::{BoardError, Result};

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
    /// Persisted by the backend.
    Stored,
    /// Kept in process memory only because the backend failed.
    LocalOnly { post_id: i64, reason: String },
}

/// What a reader sees: the board, whether it is current, and notices.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    #[serde(flatten)]
    pub view: BoardView,
    /// The posts are the last known copy, not a fresh read.
    pub stale: bool,
    /// Why the backend could not be read.
    pub offline_reason: Option<String>,
    pub notices: Vec<Notice>,
}

/// Posts accepted while the backend was failing.
#[derive(Debug)]
struct LocalPosts {
    records: Vec<PostRecord>,
    next_id: i64,
}

impl Default for LocalPosts {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: -1,
        }
    }
}

/// Orchestrates board operations.
#[derive(Debug)]
pub struct BoardController {
    store: BoardStore,
    gate: AccessGate,
    timezone: String,
    moderation: RwLock<ModerationStore>,
    notices: RwLock<NoticeBoard>,
    local: Mutex<LocalPosts>,
    cache: Mutex<ReadCache>,
    /// Held from the answered check to the insert of a backend reply.
    reply_guard: Mutex<()>,
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        debug!(field, "Rejected empty field");
        return Err(BoardError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

impl BoardController {
    /// Create a controller over `store`.
    pub fn new(
        store: BoardStore,
        gate: AccessGate,
        timezone: impl Into<String>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            store,
            gate,
            timezone: timezone.into(),
            moderation: RwLock::new(ModerationStore::new()),
            notices: RwLock::new(NoticeBoard::new()),
            local: Mutex::new(LocalPosts::default()),
            cache: Mutex::new(ReadCache::new(cache_ttl)),
            reply_guard: Mutex::new(()),
        }
    }

    /// The persistence gateway.
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Display timezone.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    async fn invalidate_cache(&self) {
        self.cache.lock().await.invalidate();
    }

    /// Accept a post from an anonymous author.
    pub async fn submit_post(
        &self,
        author: &str,
        category: Category,
        text: &str,
    ) -> Result<Submission> {
        require_text("name", author)?;
        require_text("text", text)?;

        let author = author.trim();
        if self.moderation.read().await.is_blocked(author) {
            debug!(author, "Rejected post from blocked author");
            return Err(BoardError::Blocked(author.to_string()));
        }

        let new_post = NewPost::new(author, category, text.trim());
        match self.store.create_post(&new_post).await {
            Ok(()) => {
                self.invalidate_cache().await;
                info!(author, category = %category, "Post created");
                Ok(Submission::Stored)
            }
            Err(e) if e.is_infrastructure() => {
                let mut local = self.local.lock().await;
                let post_id = local.next_id;
                local.next_id -= 1;
                local
                    .records
                    .insert(0, PostRecord::without_replies(new_post.into_post(post_id)));
                warn!(post_id, "Backend write failed, post kept locally: {}", e);
                Ok(Submission::LocalOnly {
                    post_id,
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Read the board. Never fails: on backend trouble the last known
    /// posts are returned and marked stale.
    pub async fn fetch_board(&self) -> BoardSnapshot {
        let (mut records, stale, offline_reason) = {
            let mut cache = self.cache.lock().await;
            if let Some(fresh) = cache.fresh() {
                (fresh.to_vec(), false, None)
            } else {
                match self.store.list_posts().await {
                    Ok(records) => {
                        cache.store(records.clone());
                        (records, false, None)
                    }
                    Err(e) => {
                        let last = cache.last_known().map(<[_]>::to_vec).unwrap_or_default();
                        (last, true, Some(e.to_string()))
                    }
                }
            }
        };

        let local = self.local.lock().await;
        if !local.records.is_empty() {
            records.extend(local.records.iter().cloned());
            // Stable sort keeps backend order for equal timestamps.
            records.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        }
        drop(local);

        BoardSnapshot {
            view: build_view_model(&records, &Utc::now(), &self.timezone),
            stale,
            offline_reason,
            notices: self.notices().await,
        }
    }

    /// Delete a post and its replies. Admin only.
    pub async fn delete_post(&self, session: &Session, post_id: i64) -> Result<()> {
        self.gate.require_admin(session, "delete post")?;

        if post_id < 0 {
            let mut local = self.local.lock().await;
            let before = local.records.len();
            local.records.retain(|r| r.post.id != post_id);
            if local.records.len() == before {
                return Err(BoardError::NotFound(format!("post {post_id}")));
            }
            info!(post_id, "Local post deleted");
            return Ok(());
        }

        self.store.delete_post(post_id).await?;
        self.invalidate_cache().await;
        info!(post_id, "Post deleted");
        Ok(())
    }

    /// Attach the canonical reply to a post. Admin only.
    pub async fn reply_to(&self, session: &Session, post_id: i64, text: &str) -> Result<()> {
        self.gate.require_admin(session, "reply")?;
        require_text("reply", text)?;
        let text = text.trim();

        if post_id < 0 {
            let mut local = self.local.lock().await;
            let record = local
                .records
                .iter_mut()
                .find(|r| r.post.id == post_id)
                .ok_or_else(|| BoardError::NotFound(format!("post {post_id}")))?;
            if !record.replies.is_empty() {
                return Err(BoardError::AlreadyAnswered(post_id));
            }
            record.replies.push(Reply {
                post_id,
                body: text.to_string(),
                created_at: Utc::now().max(record.post.created_at),
            });
            info!(post_id, "Local post answered");
            return Ok(());
        }

        let _guard = self.reply_guard.lock().await;
        let record = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("post {post_id}")))?;
        if !record.replies.is_empty() {
            debug!(post_id, "Rejected second reply");
            return Err(BoardError::AlreadyAnswered(post_id));
        }

        let reply =
            NewReply::new(post_id, text).with_created_at(Utc::now().max(record.post.created_at));
        self.store.create_reply(&reply).await?;
        self.invalidate_cache().await;
        info!(post_id, "Post answered");
        Ok(())
    }

    /// Bar a display name from posting. Admin only.
    ///
    /// Returns `false` if the name was already blocked.
    pub async fn block_author(&self, session: &Session, name: &str) -> Result<bool> {
        self.gate.require_admin(session, "block author")?;
        require_text("name", name)?;

        let added = self.moderation.write().await.block(name);
        if added {
            info!(name = name.trim(), "Author blocked");
        }
        Ok(added)
    }

    /// Lift a block. Admin only.
    ///
    /// Returns `false` if the name was not blocked.
    pub async fn unblock_author(&self, session: &Session, name: &str) -> Result<bool> {
        self.gate.require_admin(session, "unblock author")?;

        let removed = self.moderation.write().await.unblock(name);
        if removed {
            info!(name = name.trim(), "Author unblocked");
        }
        Ok(removed)
    }

    /// Currently blocked names. Admin only.
    pub async fn blocked_authors(&self, session: &Session) -> Result<Vec<BlockedUser>> {
        self.gate.require_admin(session, "list blocked authors")?;
        Ok(self.moderation.read().await.list())
    }

    /// Publish a notice. Admin only.
    pub async fn publish_notice(
        &self,
        session: &Session,
        severity: NoticeSeverity,
        text: &str,
    ) -> Result<Notice> {
        self.gate.require_admin(session, "publish notice")?;
        require_text("notice", text)?;

        let notice = self.notices.write().await.publish(severity, text.trim());
        info!(notice_id = notice.id, severity = %severity, "Notice published");
        Ok(notice)
    }

    /// Remove a notice. Admin only.
    pub async fn retract_notice(&self, session: &Session, notice_id: u64) -> Result<Notice> {
        self.gate.require_admin(session, "retract notice")?;

        let notice = self
            .notices
            .write()
            .await
            .retract(notice_id)
            .ok_or_else(|| BoardError::NotFound(format!("notice {notice_id}")))?;
        info!(notice_id, "Notice retracted");
        Ok(notice)
    }

    /// Live notices, newest first.
    pub async fn notices(&self) -> Vec<Notice> {
        self.notices.read().await.list()
    }

    /// Try to elevate `session` to admin.
    pub async fn login(&self, session: &mut Session, secret: &str) -> bool {
        let gate = self.gate.clone();
        let secret = secret.to_string();
        // Argon2 verification is CPU-bound.
        let verified = tokio::task::spawn_blocking(move || gate.verify(&secret))
            .await
            .unwrap_or(false);
        AccessGate::apply_login(session, verified);
        verified
    }

    /// Drop admin rights.
    pub fn logout(&self, session: &mut Session) {
        self.gate.logout(session);
    }

    /// Summary counts of the current board.
    pub async fn statistics(&self) -> BoardStats {
        self.fetch_board().await.view.stats
    }
}
