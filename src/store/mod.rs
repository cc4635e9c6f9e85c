//! Persistence gateway.
//!
//! [`BoardStore`] hides which backend holds the board: the hosted
//! table-store, a local SQLite file, or nothing at all. Every operation
//! reports backend trouble as [`BoardError::BackendUnavailable`] or
//! [`BoardError::Transient`] so callers can degrade instead of crash.

mod cache;
mod rest;
#[cfg(feature = "sqlite")]
mod schema;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use cache::ReadCache;
pub use rest::RestStore;
#[cfg(feature = "sqlite")]
pub use schema::MIGRATIONS;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::board::{NewPost, NewReply, PostRecord};
use crate::config::BackendConfig;
use crate::{BoardError, Result};

/// The configured board backend.
#[derive(Debug, Clone)]
pub enum BoardStore {
    /// Hosted PostgREST-style table-store.
    Rest(RestStore),
    /// Local SQLite database.
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
    /// No backend; every operation fails with `BackendUnavailable`.
    Unconfigured,
}

fn unconfigured() -> BoardError {
    BoardError::BackendUnavailable("no backend configured".to_string())
}

impl BoardStore {
    /// Pick a backend from configuration.
    ///
    /// Never fails: a backend that cannot be set up is logged and the
    /// board starts unconfigured.
    pub async fn from_config(config: &BackendConfig) -> Self {
        if config.has_remote() {
            match RestStore::new(
                &config.url,
                &config.key,
                Duration::from_secs(config.connect_timeout_secs),
                Duration::from_secs(config.timeout_secs),
            ) {
                Ok(store) => {
                    info!("Using hosted table-store at {}", store.base_url());
                    return BoardStore::Rest(store);
                }
                Err(e) => warn!("Hosted table-store disabled: {}", e),
            }
        }

        #[cfg(feature = "sqlite")]
        if let Some(path) = config.sqlite_path.as_deref().filter(|p| !p.trim().is_empty()) {
            match SqliteStore::open(path).await {
                Ok(store) => return BoardStore::Sqlite(store),
                Err(e) => warn!("SQLite backend disabled: {}", e),
            }
        }

        warn!("No persistence backend configured; posts will be kept in memory only");
        BoardStore::Unconfigured
    }

    /// Short backend name for logs and health checks.
    pub fn backend_name(&self) -> &'static str {
        match self {
            BoardStore::Rest(_) => "rest",
            #[cfg(feature = "sqlite")]
            BoardStore::Sqlite(_) => "sqlite",
            BoardStore::Unconfigured => "none",
        }
    }

    /// Whether a backend is present.
    pub fn is_configured(&self) -> bool {
        !matches!(self, BoardStore::Unconfigured)
    }

    fn log_failure<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            // Unconfigured is the steady state; the startup warning covers it.
            if self.is_configured() {
                warn!("{} failed on {} backend: {}", operation, self.backend_name(), e);
            } else {
                debug!("{} skipped: {}", operation, e);
            }
        }
        result
    }

    /// All posts newest first, each with its replies oldest first.
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>> {
        let result = match self {
            BoardStore::Rest(s) => s.list_posts().await,
            #[cfg(feature = "sqlite")]
            BoardStore::Sqlite(s) => s.list_posts().await,
            BoardStore::Unconfigured => Err(unconfigured()),
        };
        self.log_failure("list_posts", result)
    }

    /// A single post with its replies, `None` when it does not exist.
    pub async fn get_post(&self, id: i64) -> Result<Option<PostRecord>> {
        let result = match self {
            BoardStore::Rest(s) => s.get_post(id).await,
            #[cfg(feature = "sqlite")]
            BoardStore::Sqlite(s) => s.get_post(id).await,
            BoardStore::Unconfigured => Err(unconfigured()),
        };
        self.log_failure("get_post", result)
    }

    /// Persist a new post.
    pub async fn create_post(&self, new_post: &NewPost) -> Result<()> {
        let result = match self {
            BoardStore::Rest(s) => s.create_post(new_post).await,
            #[cfg(feature = "sqlite")]
            BoardStore::Sqlite(s) => s.create_post(new_post).await,
            BoardStore::Unconfigured => Err(unconfigured()),
        };
        self.log_failure("create_post", result)
    }

    /// Delete a post and all of its replies.
    pub async fn delete_post(&self, id: i64) -> Result<()> {
        let result = match self {
            BoardStore::Rest(s) => s.delete_post(id).await,
            #[cfg(feature = "sqlite")]
            BoardStore::Sqlite(s) => s.delete_post(id).await,
            BoardStore::Unconfigured => Err(unconfigured()),
        };
        self.log_failure("delete_post", result)
    }

    /// Persist a reply.
    pub async fn create_reply(&self, new_reply: &NewReply) -> Result<()> {
        let result = match self {
            BoardStore::Rest(s) => s.create_reply(new_reply).await,
            #[cfg(feature = "sqlite")]
            BoardStore::Sqlite(s) => s.create_reply(new_reply).await,
            BoardStore::Unconfigured => Err(unconfigured()),
        };
        self.log_failure("create_reply", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_config_is_unconfigured() {
        let store = BoardStore::from_config(&BackendConfig::default()).await;
        assert!(!store.is_configured());
        assert_eq!(store.backend_name(), "none");
    }

    #[tokio::test]
    async fn test_unconfigured_operations_fail() {
        let store = BoardStore::Unconfigured;
        assert!(matches!(
            store.list_posts().await,
            Err(BoardError::BackendUnavailable(_))
        ));
        assert!(matches!(
            store.create_post(&NewPost::new("a", Default::default(), "b")).await,
            Err(BoardError::BackendUnavailable(_))
        ));
        assert!(matches!(
            store.delete_post(1).await,
            Err(BoardError::BackendUnavailable(_))
        ));
        assert!(matches!(
            store.create_reply(&NewReply::new(1, "x")).await,
            Err(BoardError::BackendUnavailable(_))
        ));
        assert!(matches!(
            store.get_post(1).await,
            Err(BoardError::BackendUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_remote_preferred_over_sqlite() {
        let config = BackendConfig {
            url: "https://example.supabase.co".to_string(),
            key: "anon".to_string(),
            sqlite_path: Some("unused.db".to_string()),
            ..Default::default()
        };
        let store = BoardStore::from_config(&config).await;
        assert_eq!(store.backend_name(), "rest");
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_sqlite_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BackendConfig {
            sqlite_path: Some(dir.path().join("board.db").to_string_lossy().into_owned()),
            ..Default::default()
        };
        let store = BoardStore::from_config(&config).await;
        assert_eq!(store.backend_name(), "sqlite");
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_remote_url_falls_back() {
        let config = BackendConfig {
            url: "::not a url::".to_string(),
            key: "anon".to_string(),
            ..Default::default()
        };
        let store = BoardStore::from_config(&config).await;
        assert!(!store.is_configured());
    }
}
