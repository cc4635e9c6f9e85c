//! Response DTOs for Web API.

use serde::Serialize;

use crate::auth::Role;
use crate::controller::Submission;
use crate::site::{MenuSection, SectionContent};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token for the `Authorization: Bearer` header.
    pub token: String,
    pub role: Role,
    /// Seconds of inactivity before the session is dropped.
    pub idle_timeout_secs: u64,
}

/// Current session.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub role: Role,
    /// Whether the request carried a live session token.
    pub authenticated: bool,
}

/// Result of a post submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: Submission,
    /// Message to show the author.
    pub message: &'static str,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        let message = match submission {
            Submission::Stored => "게시글이 등록되었습니다.",
            Submission::LocalOnly { .. } => {
                "서버에 연결할 수 없어 게시글이 임시로 저장되었습니다."
            }
        };
        Self {
            submission,
            message,
        }
    }
}

/// Menu entry.
#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

impl From<MenuSection> for SectionSummary {
    fn from(section: MenuSection) -> Self {
        Self {
            slug: section.slug(),
            title: section.title(),
            icon: section.icon(),
        }
    }
}

/// A rendered section.
#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub slug: &'static str,
    pub title: &'static str,
    pub content: SectionContent,
}

/// Result of a block or unblock.
#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub name: String,
    /// False when the list already was in the requested state.
    pub changed: bool,
}

/// Acknowledgement of an inquiry.
#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    pub message: &'static str,
}
