//! Request DTOs for Web API.

use serde::Deserialize;

use crate::notice::NoticeSeverity;

/// Admin login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin secret.
    pub secret: String,
}

/// New post request.
///
/// `category` is parsed by the handler so an unknown value is a
/// validation error rather than a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// Author name.
    pub name: String,
    /// Category key or label.
    pub category: String,
    /// Post body.
    pub text: String,
}

/// Admin reply request.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

/// Notice request.
#[derive(Debug, Deserialize)]
pub struct NoticeRequest {
    #[serde(default)]
    pub severity: NoticeSeverity,
    pub text: String,
}

/// Block request.
#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    /// Author name to block.
    pub name: String,
}
