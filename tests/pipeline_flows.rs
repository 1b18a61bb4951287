//! Multi-step flows through the API: a project from first upload to proposal.

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
use project_pilot::domain::project::Template;
use project_pilot::ports::ProjectRepository;

const TOKEN: &str = "flow-token";

struct Harness {
    app: Router,
    store: Arc<InMemoryStore>,
    ai: MockAIProvider,
}

impl Harness {
    fn new(ai: MockAIProvider) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(
            Repositories::in_memory(store.clone()),
            Arc::new(InMemoryObjectStorage::new()),
            ContentGenerator::new(Arc::new(ai.clone())),
            Arc::new(MockSessionValidator::new().with_test_user(TOKEN, "pm-7")),
        )
        .with_public_base_url("http://pilot.test");
        Self {
            app: build_router(state, &RouterConfig::default()),
            store,
            ai,
        }
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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
        let response = self
            .app
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

    async fn finish(&self, job_id: &Value) -> Value {
        let uri = format!("/api/jobs/{}", job_id.as_str().unwrap());
        for _ in 0..100 {
            let (_, job) = self.call(Method::GET, &uri, None).await;
            if job["status"] == "completed" || job["status"] == "failed" {
                return job;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job did not finish: {}", uri);
    }

    async fn project_with_document(&self) -> (String, String) {
        let (_, project) = self
            .call(Method::POST, "/api/projects", Some(json!({ "name": "Atlas" })))
            .await;
        let project_id = project["id"].as_str().unwrap().to_string();

        let (status, document) = self
            .call(
                Method::POST,
                &format!("/api/projects/{}/documents", project_id),
                Some(json!({ "title": "Requirements", "content": "Users sign in and track tasks." })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let document_id = document["id"].as_str().unwrap().to_string();

        let (_, accepted) = self
            .call(Method::POST, &format!("/api/documents/{}/generate", document_id), None)
            .await;
        let job = self.finish(&accepted["job_id"]).await;
        assert_eq!(job["status"], "completed");

        (project_id, document_id)
    }
}

fn sections_reply() -> &'static str {
    r#"{"sections":[{"heading":"Auth","content":"Email sign-in."},{"heading":"Tasks","content":"CRUD."}]}"#
}

#[tokio::test]
async fn document_to_source_code_to_quality_check() {
    let harness = Harness::new(
        MockAIProvider::new()
            .with_response(sections_reply())
            .with_response("```python\ndef sign_in():\n    pass\n```"),
    );
    let (project_id, document_id) = harness.project_with_document().await;

    let (status, accepted) = harness
        .call(
            Method::POST,
            &format!("/api/documents/{}/source-code", document_id),
            Some(json!({ "language": "python" })),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let job = harness.finish(&accepted["job_id"]).await;
    assert_eq!(job["status"], "completed");

    let (_, codes) = harness
        .call(Method::GET, &format!("/api/projects/{}/source-codes", project_id), None)
        .await;
    let codes = codes.as_array().unwrap();
    assert_eq!(codes.len(), 1);
    assert!(codes[0]["file_name"].as_str().unwrap().ends_with(".py"));
    assert!(!codes[0]["content"].as_str().unwrap().contains("```"));

    // The remaining replies are not JSON, so every stage uses its sample entries.
    let (status, accepted) = harness
        .call(Method::POST, &format!("/api/projects/{}/quality-checks", project_id), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let job = harness.finish(&accepted["job_id"]).await;
    assert_eq!(job["status"], "completed");
    assert_eq!(job["fallback"], true);

    let (status, check) = harness
        .call(Method::GET, &format!("/api/checks/{}", accepted["check_id"].as_str().unwrap()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["complete"], true);
    assert!(!check["issues"].as_array().unwrap().is_empty());
    assert!(check["score"].as_u64().unwrap() <= 100);

    assert_eq!(harness.ai.call_count(), 5);
}

#[tokio::test]
async fn consistency_check_scores_selected_documents() {
    let harness = Harness::new(MockAIProvider::new().with_response(sections_reply()));
    let (_, document_id) = harness.project_with_document().await;

    let (status, accepted) = harness
        .call(
            Method::POST,
            "/api/consistency-checks",
            Some(json!({ "document_ids": [document_id.clone(), document_id] })),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let job = harness.finish(&accepted["job_id"]).await;
    assert_eq!(job["status"], "completed");

    let (_, check) = harness
        .call(Method::GET, &format!("/api/checks/{}", accepted["check_id"].as_str().unwrap()), None)
        .await;
    assert_eq!(check["kind"], "consistency");
    assert_eq!(check["complete"], true);
}

#[tokio::test]
async fn proposal_is_drafted_from_a_template() {
    let harness = Harness::new(MockAIProvider::new().with_response(sections_reply()));
    let template = Template::new("Fixed bid", "# Scope\n\n# Price\n");
    ProjectRepository::save_template(harness.store.as_ref(), &template)
        .await
        .unwrap();
    let (project_id, _) = harness.project_with_document().await;

    let (status, accepted) = harness
        .call(
            Method::POST,
            &format!("/api/projects/{}/proposals", project_id),
            Some(json!({ "template_id": template.id.to_string() })),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let job = harness.finish(&accepted["job_id"]).await;
    assert_eq!(job["status"], "completed");
    assert_eq!(job["fallback"], false);

    let proposal_id = job["target_id"].as_str().unwrap();
    let (status, proposal) = harness
        .call(Method::GET, &format!("/api/proposals/{}", proposal_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(proposal["template_id"], template.id.to_string());
    assert!(!proposal["file_url"].as_str().unwrap().is_empty());
    assert_eq!(harness.store.proposal_count().await, 1);
}

#[tokio::test]
async fn progress_report_covers_logged_activity() {
    let harness = Harness::new(MockAIProvider::new().with_response("We are on track."));
    let (_, project) = harness
        .call(Method::POST, "/api/projects", Some(json!({ "name": "Orion" })))
        .await;
    let project_id = project["id"].as_str().unwrap();

    for (phase, status) in [("design", "completed"), ("build", "in_progress")] {
        let (code, _) = harness
            .call(
                Method::POST,
                &format!("/api/projects/{}/activity-logs", project_id),
                Some(json!({ "phase": phase, "status": status, "timestamp": "2026-03-10T12:00:00Z" })),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, report) = harness
        .call(
            Method::POST,
            &format!("/api/projects/{}/progress-reports", project_id),
            Some(json!({ "start_date": "2026-03-01", "end_date": "2026-03-31" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["summary"], "We are on track.");
    let report_id = report["report_id"].as_str().unwrap();
    assert_eq!(
        report["url"],
        format!("http://pilot.test/progress-reports/{}", report_id)
    );

    let (status, stored) = harness
        .call(Method::GET, &format!("/api/progress-reports/{}", report_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["project_id"], project_id);

    // Nothing logged in April.
    let (_, empty) = harness
        .call(
            Method::POST,
            &format!("/api/projects/{}/progress-reports", project_id),
            Some(json!({ "start_date": "2026-04-01", "end_date": "2026-04-30" })),
        )
        .await;
    assert!(empty["report_id"].is_null());
    assert_eq!(empty["url"], "");
    assert_eq!(harness.store.report_count().await, 1);
}
