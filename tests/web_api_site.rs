//! Web API Site Tests
//!
//! Integration tests for the microsite sections and the contact form.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_test_server, offline_controller};

#[tokio::test]
async fn test_list_sections() {
    let (server, _state) = create_test_server(offline_controller());

    let response = server.get("/api/sections").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let sections = body["data"].as_array().unwrap();
    assert_eq!(sections.len(), 9);
    assert_eq!(sections[0]["slug"], "overview");
    assert_eq!(sections[8]["slug"], "community");
    assert!(sections.iter().all(|s| s["title"].is_string()));
}

#[tokio::test]
async fn test_every_section_renders() {
    let (server, _state) = create_test_server(offline_controller());

    let body: Value = server.get("/api/sections").await.json();
    for section in body["data"].as_array().unwrap() {
        let slug = section["slug"].as_str().unwrap();
        let response = server.get(&format!("/api/sections/{slug}")).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], slug);
        assert_eq!(body["data"]["content"]["kind"], slug);
    }
}

#[tokio::test]
async fn test_overview_has_countdown() {
    let (server, _state) = create_test_server(offline_controller());

    let body: Value = server.get("/api/sections/overview").await.json();
    let state = body["data"]["content"]["countdown"]["state"].as_str().unwrap();
    assert!(state == "open" || state == "closed");
}

#[tokio::test]
async fn test_unknown_section() {
    let (server, _state) = create_test_server(offline_controller());

    let response = server.get("/api/sections/home").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_inquiry() {
    let (server, _state) = create_test_server(offline_controller());

    let response = server
        .post("/api/inquiries")
        .json(&json!({
            "name": "Kim",
            "email": "kim@example.com",
            "topic": "제출 방법",
            "message": "파일 용량 제한이 있나요?"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"]["message"].as_str().unwrap().contains("접수"));

    let response = server
        .post("/api/inquiries")
        .json(&json!({
            "name": "Kim",
            "email": "kim.example.com",
            "topic": "제출 방법",
            "message": "?"
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health() {
    let server = axum_test::TestServer::new(contest_board::web::create_health_router()).unwrap();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
