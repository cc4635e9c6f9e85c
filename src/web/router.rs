//! Router configuration for Web API.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    block_author, create_post, delete_post, get_board, get_section, get_stats, list_blocks,
    list_notices, list_sections, login, logout, me, publish_notice, reply_to_post,
    retract_notice, submit_inquiry, unblock_author, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me));

    let board_routes = Router::new()
        .route("/board", get(get_board))
        .route("/stats", get(get_stats))
        .route("/posts", post(create_post))
        .route("/posts/:id", delete(delete_post))
        .route("/posts/:id/reply", post(reply_to_post));

    let moderation_routes = Router::new()
        .route("/notices", get(list_notices).post(publish_notice))
        .route("/notices/:id", delete(retract_notice))
        .route("/blocks", get(list_blocks).post(block_author))
        .route("/blocks/:name", delete(unblock_author));

    let site_routes = Router::new()
        .route("/sections", get(list_sections))
        .route("/sections/:slug", get(get_section))
        .route("/inquiries", post(submit_inquiry));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(board_routes)
        .merge(moderation_routes)
        .merge(site_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_router() {
        let server = TestServer::new(create_health_router()).unwrap();
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }
}
