//! Test helpers for integration tests.
//!
//! Provides board controllers over in-memory SQLite, a TestServer wired
//! to the API router, and a fake table-store speaking the REST dialect
//! `RestStore` uses.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use contest_board::auth::{hash_secret, AccessGate, Session, SessionManager};
use contest_board::logging::init_for_tests;
use contest_board::site::ContestInfo;
use contest_board::store::{RestStore, SqliteStore};
use contest_board::web::{create_router, AppState};
use contest_board::{BoardController, BoardStore};

/// Admin secret accepted by [`admin_gate`].
pub const ADMIN_SECRET: &str = "test-admin-secret";

/// Access key accepted by the fake table-store.
pub const TABLE_KEY: &str = "test-table-key";

/// Gate accepting [`ADMIN_SECRET`]. The hash is computed once per test binary.
pub fn admin_gate() -> AccessGate {
    static HASH: OnceLock<String> = OnceLock::new();
    let hash = HASH.get_or_init(|| hash_secret(ADMIN_SECRET).expect("hash admin secret"));
    AccessGate::from_hash(hash.clone())
}

/// Controller over a fresh in-memory SQLite store, reading through.
pub async fn sqlite_controller() -> BoardController {
    cached_sqlite_controller(Duration::ZERO).await
}

/// Controller over a fresh in-memory SQLite store with a listing cache
/// valid for `ttl`.
pub async fn cached_sqlite_controller(ttl: Duration) -> BoardController {
    init_for_tests();
    let store = SqliteStore::open_in_memory()
        .await
        .expect("Failed to create test database");
    BoardController::new(BoardStore::Sqlite(store), admin_gate(), "Asia/Seoul", ttl)
}

/// Controller with no backend at all.
pub fn offline_controller() -> BoardController {
    init_for_tests();
    BoardController::new(
        BoardStore::Unconfigured,
        admin_gate(),
        "Asia/Seoul",
        Duration::ZERO,
    )
}

/// Controller over the fake table-store at `addr`.
pub fn rest_controller(addr: SocketAddr) -> BoardController {
    init_for_tests();
    BoardController::new(
        BoardStore::Rest(rest_store(addr, TABLE_KEY)),
        admin_gate(),
        "Asia/Seoul",
        Duration::ZERO,
    )
}

/// Client for the fake table-store at `addr`.
pub fn rest_store(addr: SocketAddr, key: &str) -> RestStore {
    RestStore::new(
        &format!("http://{addr}"),
        key,
        Duration::from_secs(2),
        Duration::from_secs(5),
    )
    .expect("Failed to create REST store")
}

/// A session that has logged in as admin.
pub async fn admin_session(controller: &BoardController) -> Session {
    let mut session = Session::new();
    assert!(controller.login(&mut session, ADMIN_SECRET).await);
    session
}

/// API server over `controller`.
pub fn create_test_server(controller: BoardController) -> (TestServer, Arc<AppState>) {
    let app_state = Arc::new(AppState::new(
        controller,
        SessionManager::default(),
        ContestInfo::default(),
    ));
    let router = create_router(app_state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, app_state)
}

/// Log in through the API and return the bearer token.
pub async fn login_token(server: &TestServer) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "secret": ADMIN_SECRET }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

// ============================================================================
// Fake table-store
// ============================================================================

/// Rows held by the fake table-store.
#[derive(Debug, Default)]
pub struct FakeTables {
    pub posts: Vec<Value>,
    pub replies: Vec<Value>,
    next_id: i64,
    /// Answer every request with 500 while set.
    pub failing: bool,
    /// Requests seen, as "METHOD table".
    pub requests: Vec<String>,
}

pub type SharedTables = Arc<Mutex<FakeTables>>;

/// Start a fake table-store on an ephemeral port.
pub async fn spawn_table_store() -> (SocketAddr, SharedTables) {
    let tables: SharedTables = Arc::new(Mutex::new(FakeTables::default()));

    let router = Router::new()
        .route(
            "/rest/v1/post",
            get(list_post_rows).post(insert_post).delete(delete_post_rows),
        )
        .route(
            "/rest/v1/reply",
            get(list_reply_rows)
                .post(insert_reply)
                .delete(delete_reply_rows),
        )
        .with_state(tables.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake table-store");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    (addr, tables)
}

/// Reject requests without the key, or all requests while failing.
fn check(tables: &mut FakeTables, headers: &HeaderMap, label: &str) -> Option<Response> {
    tables.requests.push(label.to_string());
    let key_ok = headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(TABLE_KEY)
        && headers.get("authorization").and_then(|v| v.to_str().ok())
            == Some(format!("Bearer {TABLE_KEY}").as_str());
    if !key_ok {
        return Some((StatusCode::UNAUTHORIZED, "invalid api key").into_response());
    }
    if tables.failing {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "database error").into_response());
    }
    None
}

/// Value of an `id=eq.N` filter.
fn id_filter(query: &HashMap<String, String>) -> Option<i64> {
    query.get("id")?.strip_prefix("eq.")?.parse().ok()
}

fn created_at(row: &Value) -> String {
    row["created_at"].as_str().unwrap_or_default().to_string()
}

async fn list_post_rows(
    State(tables): State<SharedTables>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut tables = tables.lock().await;
    if let Some(rejection) = check(&mut tables, &headers, "GET post") {
        return rejection;
    }

    let mut rows: Vec<Value> = match id_filter(&query) {
        Some(id) => tables
            .posts
            .iter()
            .filter(|row| row["id"] == id)
            .cloned()
            .collect(),
        None => tables.posts.clone(),
    };
    if query.get("order").map(String::as_str) == Some("created_at.desc") {
        rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    }
    Json(rows).into_response()
}

async fn list_reply_rows(
    State(tables): State<SharedTables>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut tables = tables.lock().await;
    if let Some(rejection) = check(&mut tables, &headers, "GET reply") {
        return rejection;
    }

    let post_id = id_filter(&query);
    let mut rows: Vec<Value> = tables
        .replies
        .iter()
        .filter(|row| post_id.map_or(true, |id| row["id"] == id))
        .cloned()
        .collect();
    if query.get("order").map(String::as_str) == Some("created_at.asc") {
        rows.sort_by_key(created_at);
    }
    Json(rows).into_response()
}

async fn insert_post(
    State(tables): State<SharedTables>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> Response {
    let mut tables = tables.lock().await;
    if let Some(rejection) = check(&mut tables, &headers, "POST post") {
        return rejection;
    }

    tables.next_id += 1;
    row["id"] = json!(tables.next_id);
    tables.posts.push(row);
    StatusCode::CREATED.into_response()
}

async fn insert_reply(
    State(tables): State<SharedTables>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> Response {
    let mut tables = tables.lock().await;
    if let Some(rejection) = check(&mut tables, &headers, "POST reply") {
        return rejection;
    }

    tables.replies.push(row);
    StatusCode::CREATED.into_response()
}

async fn delete_post_rows(
    State(tables): State<SharedTables>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut tables = tables.lock().await;
    if let Some(rejection) = check(&mut tables, &headers, "DELETE post") {
        return rejection;
    }

    if let Some(id) = id_filter(&query) {
        tables.posts.retain(|row| row["id"] != id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_reply_rows(
    State(tables): State<SharedTables>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut tables = tables.lock().await;
    if let Some(rejection) = check(&mut tables, &headers, "DELETE reply") {
        return rejection;
    }

    if let Some(id) = id_filter(&query) {
        tables.replies.retain(|row| row["id"] != id);
    }
    StatusCode::NO_CONTENT.into_response()
}
