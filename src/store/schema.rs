//! SQLite schema and migrations.
//!
//! Column names follow the hosted table-store so rows look the same on
//! either backend.

/// Database migrations, applied in order.
pub const MIGRATIONS: &[&str] = &[
    // v1: posts and replies
    r#"
CREATE TABLE post (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    category    TEXT NOT NULL,
    text        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_post_created_at ON post(created_at);

-- id references the answered post
CREATE TABLE reply (
    id          INTEGER NOT NULL REFERENCES post(id) ON DELETE CASCADE,
    reply       TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_reply_id ON reply(id, created_at);
"#,
    // v2: at most one reply per post
    r#"
DELETE FROM reply
WHERE rowid NOT IN (SELECT MIN(rowid) FROM reply GROUP BY id);

CREATE UNIQUE INDEX idx_reply_post_unique ON reply(id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_creates_tables() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE post"));
        assert!(first.contains("CREATE TABLE reply"));
        assert!(first.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_reply_unique_per_post() {
        assert!(MIGRATIONS
            .iter()
            .any(|m| m.contains("CREATE UNIQUE INDEX idx_reply_post_unique ON reply(id)")));
    }
}
