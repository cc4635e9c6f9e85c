//! Configuration module for the contest board.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{BoardError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timezone for displaying dates (e.g., "Asia/Seoul", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timezone: default_timezone(),
        }
    }
}

/// Persistence backend configuration.
///
/// When both `url` and `key` are set the hosted table-store is used; else
/// `sqlite_path` selects a local SQLite file; otherwise the board runs
/// without a backend.
#[derive(Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted table-store.
    #[serde(default)]
    pub url: String,
    /// Access key for the hosted table-store.
    #[serde(default)]
    pub key: String,
    /// Path to a SQLite database file.
    #[serde(default)]
    pub sqlite_path: Option<String>,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
    /// How long a post listing is served from cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

fn default_cache_ttl() -> u64 {
    5
}

impl BackendConfig {
    /// Whether the hosted table-store credentials are present.
    pub fn has_remote(&self) -> bool {
        !self.url.trim().is_empty() && !self.key.trim().is_empty()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            sqlite_path: None,
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_request_timeout(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("key", &redacted(&self.key))
            .field("sqlite_path", &self.sqlite_path)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

/// Administrator configuration.
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    /// Plaintext admin secret. Hashed once at startup.
    #[serde(default)]
    pub secret: String,
    /// Pre-computed Argon2 PHC hash. Takes precedence over `secret`.
    #[serde(default)]
    pub secret_hash: String,
    /// Idle timeout for admin sessions in seconds.
    #[serde(default = "default_session_idle_timeout")]
    pub session_idle_timeout_secs: u64,
}

fn default_session_idle_timeout() -> u64 {
    30 * 60
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            secret_hash: String::new(),
            session_idle_timeout_secs: default_session_idle_timeout(),
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("secret", &redacted(&self.secret))
            .field("secret_hash", &redacted(&self.secret_hash))
            .field(
                "session_idle_timeout_secs",
                &self.session_idle_timeout_secs,
            )
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Contest information shown on the microsite.
#[derive(Debug, Clone, Deserialize)]
pub struct ContestConfig {
    /// Contest title.
    #[serde(default = "default_contest_title")]
    pub title: String,
    /// Organizing body.
    #[serde(default = "default_organizer")]
    pub organizer: String,
    /// Submission deadline (YYYY-MM-DD).
    #[serde(default = "default_deadline")]
    pub deadline: NaiveDate,
    /// Contact email for submissions and inquiries.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    /// Contact phone number.
    #[serde(default = "default_contact_phone")]
    pub contact_phone: String,
}

fn default_contest_title() -> String {
    "2025 새(AI)로고침! 우리 교실 앱 공모전".to_string()
}

fn default_organizer() -> String {
    "경상북도교육청".to_string()
}

fn default_deadline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 18).expect("valid contest deadline")
}

fn default_contact_email() -> String {
    "chs0601@gbe.kr".to_string()
}

fn default_contact_phone() -> String {
    "054-805-3112".to_string()
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            title: default_contest_title(),
            organizer: default_organizer(),
            deadline: default_deadline(),
            contact_email: default_contact_email(),
            contact_phone: default_contact_phone(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/contest-board.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Administrator configuration.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Contest information.
    #[serde(default)]
    pub contest: ContestConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BOARD_BACKEND_URL`: table-store base URL
    /// - `BOARD_BACKEND_KEY`: table-store access key
    /// - `BOARD_ADMIN_SECRET`: admin secret
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env("BOARD_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(key) = non_empty_env("BOARD_BACKEND_KEY") {
            self.backend.key = key;
        }
        if let Some(secret) = non_empty_env("BOARD_ADMIN_SECRET") {
            self.admin.secret = secret;
        }
    }

    /// Validate the configuration.
    ///
    /// A missing backend or admin secret is not an error: the board degrades
    /// to local-only mode and admin login stays closed.
    pub fn validate(&self) -> Result<()> {
        if !self.backend.url.trim().is_empty() {
            url::Url::parse(self.backend.url.trim())
                .map_err(|e| BoardError::Config(format!("invalid backend url: {e}")))?;
        }
        if self.server.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(BoardError::Config(format!(
                "unknown timezone: {}",
                self.server.timezone
            )));
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.timezone, "Asia/Seoul");

        assert!(config.backend.url.is_empty());
        assert!(config.backend.key.is_empty());
        assert!(config.backend.sqlite_path.is_none());
        assert_eq!(config.backend.connect_timeout_secs, 5);
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.backend.cache_ttl_secs, 5);
        assert!(!config.backend.has_remote());

        assert!(config.admin.secret.is_empty());
        assert_eq!(config.admin.session_idle_timeout_secs, 1800);

        assert_eq!(
            config.contest.deadline,
            NaiveDate::from_ymd_opt(2025, 7, 18).unwrap()
        );
        assert_eq!(config.contest.contact_email, "chs0601@gbe.kr");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/contest-board.log");

        assert!(config.web.cors_origins.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000
timezone = "UTC"

[backend]
url = "https://example.supabase.co"
key = "anon-key"
sqlite_path = "data/board.db"
connect_timeout_secs = 2
timeout_secs = 4
cache_ttl_secs = 1

[admin]
secret = "let-me-in"
session_idle_timeout_secs = 60

[contest]
title = "Test Contest"
organizer = "Test Office"
deadline = "2026-01-31"
contact_email = "contest@example.com"
contact_phone = "000-0000"

[logging]
level = "debug"
file = "custom/logs/app.log"

[web]
cors_origins = ["http://localhost:5173"]
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.timezone, "UTC");

        assert!(config.backend.has_remote());
        assert_eq!(config.backend.sqlite_path.as_deref(), Some("data/board.db"));
        assert_eq!(config.backend.connect_timeout_secs, 2);
        assert_eq!(config.backend.timeout_secs, 4);
        assert_eq!(config.backend.cache_ttl_secs, 1);

        assert_eq!(config.admin.secret, "let-me-in");
        assert_eq!(config.admin.session_idle_timeout_secs, 60);

        assert_eq!(config.contest.title, "Test Contest");
        assert_eq!(
            config.contest.deadline,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.web.cors_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(!config.backend.has_remote());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(BoardError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::default();
        config.backend.key = "super-secret-key".to_string();
        config.admin.secret = "hunter22".to_string();

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_has_remote_requires_both_fields() {
        let mut backend = BackendConfig::default();
        backend.url = "https://example.com".to_string();
        assert!(!backend.has_remote());

        backend.key = "key".to_string();
        assert!(backend.has_remote());
    }

    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var("BOARD_ADMIN_SECRET").ok();

        std::env::set_var("BOARD_ADMIN_SECRET", "env-secret");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.admin.secret, "env-secret");

        std::env::set_var("BOARD_ADMIN_SECRET", "");
        let mut config = Config::default();
        config.admin.secret = "file-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.admin.secret, "file-secret");

        if let Some(val) = original {
            std::env::set_var("BOARD_ADMIN_SECRET", val);
        } else {
            std::env::remove_var("BOARD_ADMIN_SECRET");
        }
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.backend.url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(BoardError::Config(_))));

        let mut config = Config::default();
        config.server.timezone = "Invalid/Zone".to_string();
        assert!(matches!(config.validate(), Err(BoardError::Config(_))));
    }
}
