//! Admin session handlers.

use axum::{extract::State, Json};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::SessionManager;
use crate::controller::BoardController;
use crate::site::ContestInfo;
use crate::web::dto::{ApiResponse, LoginRequest, LoginResponse, MeResponse};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentSession;

/// Session table shared across handlers.
pub type SharedSessions = Arc<Mutex<SessionManager>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Board operations.
    pub controller: Arc<BoardController>,
    /// Sessions by bearer token.
    pub sessions: SharedSessions,
    /// Contest facts for the microsite.
    pub contest: Arc<ContestInfo>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(controller: BoardController, sessions: SessionManager, contest: ContestInfo) -> Self {
        Self {
            controller: Arc::new(controller),
            sessions: Arc::new(Mutex::new(sessions)),
            contest: Arc::new(contest),
        }
    }
}

/// POST /api/auth/login - Elevate the caller to admin.
///
/// Reuses the caller's session when it carries a live token, otherwise a
/// new session is stored and its token returned.
pub async fn login(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.secret.is_empty() {
        return Err(ApiError::bad_request("Secret is required"));
    }

    let CurrentSession { token, mut session } = current;
    if !state.controller.login(&mut session, &req.secret).await {
        return Err(ApiError::unauthorized("Invalid admin secret"));
    }

    let mut sessions = state.sessions.lock().await;
    let token = match token {
        Some(token) if sessions.update(&session) => token,
        _ => sessions.insert(session.clone()),
    };

    Ok(Json(ApiResponse::new(LoginResponse {
        token,
        role: session.role,
        idle_timeout_secs: sessions.idle_timeout().as_secs(),
    })))
}

/// POST /api/auth/logout - Drop admin rights and forget the session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let CurrentSession { token, mut session } = current;
    state.controller.logout(&mut session);
    if let Some(token) = token {
        state.sessions.lock().await.remove(&token);
    }

    Ok(Json(ApiResponse::new(())))
}

/// GET /api/auth/me - Role of the caller.
pub async fn me(current: CurrentSession) -> Json<ApiResponse<MeResponse>> {
    Json(ApiResponse::new(MeResponse {
        role: current.session.role,
        authenticated: current.token.is_some(),
    }))
}
