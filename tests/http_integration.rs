//! End-to-end tests for the REST API.
//!
//! Drives the full router (auth middleware included) against the in-memory
//! store, in-memory object storage and a scripted AI provider.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use project_pilot::adapters::ai::MockAIProvider;
use project_pilot::adapters::auth::MockSessionValidator;
use project_pilot::adapters::http::{build_router, AppState, Repositories, RouterConfig};
use project_pilot::adapters::memory::InMemoryStore;
use project_pilot::adapters::storage::InMemoryObjectStorage;
use project_pilot::application::ContentGenerator;

const TOKEN: &str = "test-token";

fn app_with(ai: MockAIProvider) -> Router {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(
        Repositories::in_memory(store),
        Arc::new(InMemoryObjectStorage::new()),
        ContentGenerator::new(Arc::new(ai)),
        Arc::new(MockSessionValidator::new().with_test_user(TOKEN, "user-1")),
    )
    .with_public_base_url("http://pilot.test/");
    build_router(state, &RouterConfig::default())
}

fn app() -> Router {
    app_with(MockAIProvider::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_project(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": name, "description": "integration" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn wait_for_job(app: &Router, job_id: &str) -> Value {
    for _ in 0..100 {
        let (status, job) = send(app, Method::GET, &format!("/api/jobs/{}", job_id), None).await;
        assert_eq!(status, StatusCode::OK);
        if job["status"] == "completed" || job["status"] == "failed" {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {} did not finish", job_id);
}

#[tokio::test]
async fn health_needs_no_token() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_requires_a_token() {
    let response = app()
        .oneshot(Request::builder().uri("/api/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .header(header::AUTHORIZATION, "Bearer nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_project_is_listed_and_fetchable() {
    let app = app();
    let id = create_project(&app, "Apollo").await;

    let (status, list) = send(&app, Method::GET, "/api/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, project) = send(&app, Method::GET, &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], "Apollo");
    assert_eq!(project["created_by"], "user-1");
}

#[tokio::test]
async fn blank_project_name_is_a_bad_request() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/projects",
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["code"].is_string());
}

#[tokio::test]
async fn malformed_and_unknown_ids() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/projects/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/api/jobs/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "JOB_NOT_FOUND");

    let (status, _) = send(&app, Method::GET, &format!("/api/projects/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn activity_is_recorded_against_a_project() {
    let app = app();
    let id = create_project(&app, "Gemini").await;
    let (status, log) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/activity-logs", id),
        Some(json!({ "phase": "design", "status": "completed", "description": "wireframes" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["project_id"], id.as_str());
    assert_eq!(log["status"], "completed");
}

#[tokio::test]
async fn templates_are_listed() {
    let (status, templates) = send(&app(), Method::GET, "/api/templates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(templates.is_array());
}

#[tokio::test]
async fn document_generation_runs_in_the_background() {
    let ai = MockAIProvider::new()
        .with_response(r#"{"sections":[{"heading":"Overview","content":"What we build."}]}"#);
    let app = app_with(ai);
    let project_id = create_project(&app, "Mercury").await;

    let (status, document) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/documents", project_id),
        Some(json!({ "title": "brief.txt", "content": "Build a launch tracker." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let document_id = document["id"].as_str().unwrap().to_string();
    assert_eq!(document["complete"], false);

    let (status, accepted) = send(
        &app,
        Method::POST,
        &format!("/api/documents/{}/generate", document_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let job = wait_for_job(&app, accepted["job_id"].as_str().unwrap()).await;
    assert_eq!(job["status"], "completed");
    assert_eq!(job["progress"], 100);
    assert_eq!(job["fallback"], false);
    assert_eq!(job["target_id"], document_id.as_str());

    let (_, document) = send(&app, Method::GET, &format!("/api/documents/{}", document_id), None).await;
    assert_eq!(document["complete"], true);
    assert_eq!(document["sections"][0]["heading"], "Overview");
}

#[tokio::test]
async fn generating_an_unknown_document_is_404() {
    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app(),
        Method::POST,
        &format!("/api/documents/{}/generate", missing),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn work_estimate_falls_back_on_unusable_reply() {
    let app = app();
    let project_id = create_project(&app, "Vostok").await;

    let (status, estimate) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/work-estimates", project_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(estimate["fallback"], true);
    assert!(estimate["total_hours"].as_f64().unwrap() > 0.0);

    let (status, latest) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{}/work-estimates/latest", project_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["id"], estimate["id"]);
}

#[tokio::test]
async fn progress_report_rejects_bad_dates() {
    let app = app();
    let project_id = create_project(&app, "Soyuz").await;
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/progress-reports", project_id),
        Some(json!({ "start_date": "last week", "end_date": "2026-01-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn progress_report_for_unknown_project_is_404() {
    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app(),
        Method::POST,
        &format!("/api/projects/{}/progress-reports", missing),
        Some(json!({ "start_date": "2026-01-01", "end_date": "2026-01-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn consistency_check_needs_known_documents() {
    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app(),
        Method::POST,
        "/api/consistency-checks",
        Some(json!({ "document_ids": [missing.to_string()] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn proposal_with_unknown_template_is_404() {
    let app = app();
    let project_id = create_project(&app, "Voskhod").await;
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/proposals", project_id),
        Some(json!({ "template_id": uuid::Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
