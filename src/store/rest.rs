//! Hosted table-store backend.
//!
//! Talks to a PostgREST-style endpoint at `{url}/rest/v1/{table}` with the
//! access key sent both as `apikey` and as a bearer token. Two tables are
//! used: `post(id, name, category, text, created_at)` and
//! `reply(id, reply, created_at)` where `reply.id` is the answered post.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::board::{Category, NewPost, NewReply, Post, PostRecord, Reply};
use crate::datetime::{parse_timestamp, to_storage};
use crate::{BoardError, Result};

const POST_TABLE: &str = "post";
const REPLY_TABLE: &str = "reply";
const POST_COLUMNS: &str = "id,name,category,text,created_at";
const REPLY_COLUMNS: &str = "id,reply,created_at";

/// User agent string for backend requests.
const USER_AGENT: &str = concat!("contest-board/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct PostRow {
    id: i64,
    name: String,
    category: String,
    text: String,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct PostInsert<'a> {
    name: &'a str,
    category: &'a str,
    text: &'a str,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct ReplyRow {
    id: i64,
    reply: String,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct ReplyInsert<'a> {
    id: i64,
    reply: &'a str,
    created_at: String,
}

fn parse_created_at(raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(raw)
        .ok_or_else(|| BoardError::Transient(format!("malformed response: created_at {raw:?}")))
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

/// Client for the hosted table-store.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base: Url,
    key: String,
}

impl RestStore {
    /// Create a client for the store at `url` using access key `key`.
    pub fn new(url: &str, key: &str, connect_timeout: Duration, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(url.trim())
            .map_err(|e| BoardError::Config(format!("invalid backend url '{url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BoardError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            key: key.trim().to_string(),
        })
    }

    /// The base URL requests are made against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder> {
        let url = self
            .base
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| BoardError::Config(format!("invalid table url: {e}")))?;

        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("backend returned {}: {}", status, body);
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                BoardError::BackendUnavailable(format!("backend rejected credentials ({status})"))
            }
            _ => BoardError::Transient(format!("backend returned {status}")),
        })
    }

    async fn fetch_replies(&self, post_id: i64) -> Result<Vec<Reply>> {
        let request = self.request(Method::GET, REPLY_TABLE)?.query(&[
            ("select", REPLY_COLUMNS.to_string()),
            ("id", format!("eq.{post_id}")),
            ("order", "created_at.asc".to_string()),
        ]);
        let rows: Vec<ReplyRow> = self.send(request).await?.json().await?;
        rows.into_iter().map(ReplyRow::into_reply).collect()
    }

    /// All posts newest first, each with its replies oldest first.
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>> {
        let request = self
            .request(Method::GET, POST_TABLE)?
            .query(&[("select", POST_COLUMNS), ("order", "created_at.desc")]);
        let rows: Vec<PostRow> = self.send(request).await?.json().await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let post = row.into_post()?;
            let replies = self.fetch_replies(post.id).await?;
            records.push(PostRecord { post, replies });
        }
        Ok(records)
    }

    /// A single post with its replies.
    pub async fn get_post(&self, id: i64) -> Result<Option<PostRecord>> {
        let request = self
            .request(Method::GET, POST_TABLE)?
            .query(&[("select", POST_COLUMNS.to_string()), ("id", format!("eq.{id}"))]);
        let rows: Vec<PostRow> = self.send(request).await?.json().await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        let post = row.into_post()?;
        let replies = self.fetch_replies(id).await?;
        Ok(Some(PostRecord { post, replies }))
    }

    /// Insert a post.
    pub async fn create_post(&self, new_post: &NewPost) -> Result<()> {
        let row = PostInsert {
            name: &new_post.author,
            category: new_post.category.as_str(),
            text: &new_post.body,
            created_at: to_storage(&new_post.created_at),
        };
        let request = self
            .request(Method::POST, POST_TABLE)?
            .header("Prefer", "return=minimal")
            .json(&row);
        self.send(request).await?;
        Ok(())
    }

    /// Delete a post's replies, then the post.
    pub async fn delete_post(&self, id: i64) -> Result<()> {
        let filter = [("id", format!("eq.{id}"))];
        let request = self.request(Method::DELETE, REPLY_TABLE)?.query(&filter);
        self.send(request).await?;
        let request = self.request(Method::DELETE, POST_TABLE)?.query(&filter);
        self.send(request).await?;
        Ok(())
    }

    /// Insert a reply.
    pub async fn create_reply(&self, new_reply: &NewReply) -> Result<()> {
        let row = ReplyInsert {
            id: new_reply.post_id,
            reply: &new_reply.body,
            created_at: to_storage(&new_reply.created_at),
        };
        let request = self
            .request(Method::POST, REPLY_TABLE)?
            .header("Prefer", "return=minimal")
            .json(&row);
        self.send(request).await?;
        Ok(())
    }
}
