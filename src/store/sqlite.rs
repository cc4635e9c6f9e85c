//! SQLite backend.
//!
//! Stores posts and replies in the same shape as the hosted table-store:
//! `post(id, name, category, text, created_at)` and
//! `reply(id, reply, created_at)` where `reply.id` is the answered post.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::schema::MIGRATIONS;
use crate::board::{Category, NewPost, NewReply, Post, PostRecord, Reply};
use crate::datetime::{parse_timestamp, to_storage};
use crate::{BoardError, Result};

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    name: String,
    category: String,
    text: String,
    created_at: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ReplyRow {
    id: i64,
    reply: String,
    created_at: String,
}

fn parse_created_at(raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(raw)
        .ok_or_else(|| BoardError::Transient(format!("malformed created_at: {raw}")))
}

impl PostRow {
    fn into_post(self) -> Result<Post> {
        Ok(Post {
            id: self.id,
            author: self.name,
            category: Category::from_stored(&self.category),
            body: self.text,
            created_at: parse_created_at(&self.created_at)?,
        })
    }
}

impl ReplyRow {
    fn into_reply(self) -> Result<Reply> {
        Ok(Reply {
            post_id: self.id,
            body: self.reply,
            created_at: parse_created_at(&self.created_at)?,
        })
    }
}

/// Board storage in a local SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and apply migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening database at {:?}", path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Open a private in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory database");
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        // A single connection that never recycles keeps the database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Current schema version, 0 when nothing has been applied.
    pub async fn schema_version(&self) -> Result<i64> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        )
        .fetch_one(&self.pool)
        .await?;
        if !exists {
            return Ok(0);
        }

        let version: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        let current = self.schema_version().await?;
        if current as usize >= MIGRATIONS.len() {
            debug!("Database is up to date (version {})", current);
            return Ok(());
        }

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version     INTEGER PRIMARY KEY,
                applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&self.pool)
        .await?;

        for (index, migration) in MIGRATIONS.iter().enumerate().skip(current as usize) {
            let version = index as i64 + 1;
            info!("Applying migration v{}", version);

            let mut tx = self.pool.begin().await?;
            sqlx::raw_sql(migration).execute(&mut *tx).await?;
            sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
                .bind(version)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
        }

        Ok(())
    }

    /// All posts newest first, each with its replies oldest first.
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>> {
        let posts = sqlx::query_as::<_, PostRow>(
            "SELECT id, name, category, text, created_at FROM post
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let replies = sqlx::query_as::<_, ReplyRow>(
            "SELECT id, reply, created_at FROM reply ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_post: HashMap<i64, Vec<Reply>> = HashMap::new();
        for row in replies {
            let reply = row.into_reply()?;
            by_post.entry(reply.post_id).or_default().push(reply);
        }

        posts
            .into_iter()
            .map(|row| {
                let post = row.into_post()?;
                let replies = by_post.remove(&post.id).unwrap_or_default();
                Ok(PostRecord { post, replies })
            })
            .collect()
    }

    /// A single post with its replies.
    pub async fn get_post(&self, id: i64) -> Result<Option<PostRecord>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, name, category, text, created_at FROM post WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let replies = sqlx::query_as::<_, ReplyRow>(
            "SELECT id, reply, created_at FROM reply WHERE id = $1
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ReplyRow::into_reply)
        .collect::<Result<Vec<_>>>()?;

        Ok(Some(PostRecord {
            post: row.into_post()?,
            replies,
        }))
    }

    /// Insert a post.
    pub async fn create_post(&self, new_post: &NewPost) -> Result<()> {
        sqlx::query("INSERT INTO post (name, category, text, created_at) VALUES ($1, $2, $3, $4)")
            .bind(&new_post.author)
            .bind(new_post.category.as_str())
            .bind(&new_post.body)
            .bind(to_storage(&new_post.created_at))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a post and its replies. Deleting a missing post is a no-op.
    pub async fn delete_post(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM reply WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM post WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Insert a reply. A post that already has one is rejected.
    pub async fn create_reply(&self, new_reply: &NewReply) -> Result<()> {
        sqlx::query("INSERT INTO reply (id, reply, created_at) VALUES ($1, $2, $3)")
            .bind(new_reply.post_id)
            .bind(&new_reply.body)
            .bind(to_storage(&new_reply.created_at))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_unique_violation() {
                        return BoardError::AlreadyAnswered(new_reply.post_id);
                    }
                }
                BoardError::from(e)
            })?;
        Ok(())
    }

    /// Close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
