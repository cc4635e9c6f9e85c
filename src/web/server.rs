//! Web server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::auth::SessionManager;
use crate::config::Config;
use crate::controller::BoardController;
use crate::site::ContestInfo;
use crate::{BoardError, Result};

use super::handlers::{AppState, SharedSessions};
use super::router::{create_health_router, create_router};

/// Idle session sweep interval.
const SESSION_CLEANUP_INTERVAL_SECS: u64 = 300;

/// Web server for the API.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a web server serving `controller`.
    pub fn new(config: &Config, controller: BoardController) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| BoardError::Config(format!("invalid server address: {e}")))?;

        let app_state = AppState::new(
            controller,
            SessionManager::new(config.admin.session_idle_timeout_secs),
            ContestInfo::from(&config.contest),
        );

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.web.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared application state.
    pub fn app_state(&self) -> Arc<AppState> {
        self.app_state.clone()
    }

    fn start_session_cleanup_task(sessions: SharedSessions) {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                let removed = sessions.lock().await.cleanup();
                if removed > 0 {
                    tracing::info!(removed, "Cleaned up idle sessions");
                }
            }
        });
    }

    fn into_router(self) -> (Router, SocketAddr, SharedSessions) {
        let sessions = self.app_state.sessions.clone();
        let router = create_router(self.app_state, &self.cors_origins)
            .merge(create_health_router())
            .layer(CompressionLayer::new());
        (router, self.addr, sessions)
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let (router, addr, sessions) = self.into_router();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(sessions);
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Useful in tests when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let (router, addr, sessions) = self.into_router();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(sessions);
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
