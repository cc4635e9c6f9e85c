//! Board handlers for Web API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::board::{BoardStats, Category};
use crate::controller::BoardSnapshot;
use crate::web::dto::{ApiResponse, CreatePostRequest, ReplyRequest, SubmissionResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentSession;

/// GET /api/board - Posts, stats and notices.
///
/// Never fails: when the backend cannot be read the last known posts are
/// returned with `stale` set.
pub async fn get_board(State(state): State<Arc<AppState>>) -> Json<ApiResponse<BoardSnapshot>> {
    Json(ApiResponse::new(state.controller.fetch_board().await))
}

/// POST /api/posts - Submit a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<SubmissionResponse>>, ApiError> {
    let category: Category = req.category.parse().map_err(ApiError::validation)?;

    let submission = state
        .controller
        .submit_post(&req.name, category, &req.text)
        .await?;

    Ok(Json(ApiResponse::new(submission.into())))
}

/// DELETE /api/posts/:id - Delete a post and its replies (admin).
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .controller
        .delete_post(&current.session, post_id)
        .await?;

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/posts/:id/reply - Answer a post (admin).
pub async fn reply_to_post(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Path(post_id): Path<i64>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .controller
        .reply_to(&current.session, post_id, &req.text)
        .await?;

    Ok(Json(ApiResponse::new(())))
}

/// GET /api/stats - Summary counts.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<BoardStats>> {
    Json(ApiResponse::new(state.controller.statistics().await))
}
