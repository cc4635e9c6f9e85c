//! Session extraction.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::Session;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The caller's session.
///
/// A missing or expired token yields a fresh anonymous session
/// with no token; the request is never rejected here. Admin checks happen
/// in the controller.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Token of a stored session.
    pub token: Option<String>,
    pub session: Session,
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(&parts.headers) {
            if let Some(session) = state.sessions.lock().await.get(token) {
                return Ok(CurrentSession {
                    token: Some(token.to_string()),
                    session,
                });
            }
            tracing::debug!("Unknown or expired session token");
        }

        Ok(CurrentSession {
            token: None,
            session: Session::new(),
        })
    }
}
