//! Moderation and notice handlers.
//!
//! Listing notices is public; everything else is checked for admin by
//! the controller.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::moderation::BlockedUser;
use crate::notice::Notice;
use crate::web::dto::{ApiResponse, BlockRequest, BlockResponse, NoticeRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentSession;

/// GET /api/notices - Live notices, newest first.
pub async fn list_notices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<Notice>>> {
    Json(ApiResponse::new(state.controller.notices().await))
}

/// POST /api/notices - Publish a notice (admin).
pub async fn publish_notice(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(req): Json<NoticeRequest>,
) -> Result<Json<ApiResponse<Notice>>, ApiError> {
    let notice = state
        .controller
        .publish_notice(&current.session, req.severity, &req.text)
        .await?;

    Ok(Json(ApiResponse::new(notice)))
}

/// DELETE /api/notices/:id - Retract a notice (admin).
pub async fn retract_notice(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Path(notice_id): Path<u64>,
) -> Result<Json<ApiResponse<Notice>>, ApiError> {
    let notice = state
        .controller
        .retract_notice(&current.session, notice_id)
        .await?;

    Ok(Json(ApiResponse::new(notice)))
}

/// GET /api/blocks - Blocked authors (admin).
pub async fn list_blocks(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<Vec<BlockedUser>>>, ApiError> {
    let blocked = state.controller.blocked_authors(&current.session).await?;
    Ok(Json(ApiResponse::new(blocked)))
}

/// POST /api/blocks - Block an author (admin).
pub async fn block_author(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(req): Json<BlockRequest>,
) -> Result<Json<ApiResponse<BlockResponse>>, ApiError> {
    let changed = state
        .controller
        .block_author(&current.session, &req.name)
        .await?;

    Ok(Json(ApiResponse::new(BlockResponse {
        name: req.name.trim().to_string(),
        changed,
    })))
}

/// DELETE /api/blocks/:name - Unblock an author (admin).
pub async fn unblock_author(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<BlockResponse>>, ApiError> {
    let changed = state
        .controller
        .unblock_author(&current.session, &name)
        .await?;

    Ok(Json(ApiResponse::new(BlockResponse {
        name: name.trim().to_string(),
        changed,
    })))
}
