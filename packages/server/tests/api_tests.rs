//! Route-level tests for the HTTP API, run against in-memory stores.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;
use uuid::Uuid;

use server_core::kernel::jobs::testing::MemoryJobStore;
use server_core::kernel::jobs::{ContentType, InProcessQueue, Job, JobStatus, JobStore};
use server_core::server::build_app;

fn test_app() -> (Router, Arc<MemoryJobStore>, UnboundedReceiver<Uuid>) {
    let store = Arc::new(MemoryJobStore::new());
    let (queue, rx) = InProcessQueue::new();
    let app = build_app(store.clone(), Arc::new(queue));
    (app, store, rx)
}

async fn send_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn submit_text_creates_a_queued_job_and_dispatches_it() {
    let (app, store, mut rx) = test_app();

    let (status, body) = send_json(
        app,
        "POST",
        "/submit",
        Some(json!({ "text": "hello world" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");

    let job_id = Uuid::parse_str(body["job_id"].as_str().unwrap()).unwrap();
    let job = store.get(job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Queued);
    assert_eq!(job.content, "hello world");
    assert!(job.content_hash.is_some());

    // The job id reached the dispatch queue.
    assert_eq!(rx.recv().await, Some(job_id));
}

#[tokio::test]
async fn submit_with_both_fields_is_rejected_without_creating_a_job() {
    let (app, store, _rx) = test_app();

    let (status, body) = send_json(
        app,
        "POST",
        "/submit",
        Some(json!({ "text": "hello", "url": "https://example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Provide 'text' or 'url', not both");
    assert!(store.is_empty());
}

#[tokio::test]
async fn submit_with_neither_field_is_rejected_without_creating_a_job() {
    let (app, store, _rx) = test_app();

    let (status, body) = send_json(app, "POST", "/submit", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Provide either 'text' or 'url'");
    assert!(store.is_empty());
}

#[tokio::test]
async fn submit_with_a_malformed_url_is_rejected() {
    let (app, store, _rx) = test_app();

    let (status, body) = send_json(app, "POST", "/submit", Some(json!({ "url": "not-a-url" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid URL format");
    assert!(store.is_empty());
}

#[tokio::test]
async fn status_of_an_unknown_job_is_not_found() {
    let (app, _store, _rx) = test_app();

    let uri = format!("/status/{}", Uuid::new_v4());
    let (status, body) = send_json(app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found");
}

#[tokio::test]
async fn status_of_a_garbage_id_is_not_found() {
    let (app, _store, _rx) = test_app();

    let (status, _body) = send_json(app, "GET", "/status/garbage", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_the_job_state_and_creation_time() {
    let (app, store, _rx) = test_app();

    let job = Job::queued(ContentType::Text, "hello", "hash");
    store.create(&job).await.unwrap();

    let uri = format!("/status/{}", job.id);
    let (status, body) = send_json(app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job_id"], job.id.to_string());
    assert_eq!(body["status"], "queued");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn result_of_a_queued_job_is_not_ready() {
    let (app, store, _rx) = test_app();

    let job = Job::queued(ContentType::Text, "hello", "hash");
    store.create(&job).await.unwrap();

    let uri = format!("/result/{}", job.id);
    let (status, body) = send_json(app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not ready");
}

#[tokio::test]
async fn result_of_a_failed_job_is_not_ready_rather_than_an_empty_summary() {
    let (app, store, _rx) = test_app();

    let mut job = Job::queued(ContentType::Text, "hello", "hash");
    job.status = JobStatus::Failed;
    store.create(&job).await.unwrap();

    let uri = format!("/result/{}", job.id);
    let (status, body) = send_json(app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not ready");
}

#[tokio::test]
async fn result_of_a_completed_text_job_omits_the_original_url() {
    let (app, store, _rx) = test_app();

    let mut job = Job::queued(ContentType::Text, "hello", "hash");
    job.status = JobStatus::Completed;
    job.summary = Some("A greeting.".to_string());
    job.cached = false;
    job.processing_time_ms = Some(42);
    store.create(&job).await.unwrap();

    let uri = format!("/result/{}", job.id);
    let (status, body) = send_json(app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job_id"], job.id.to_string());
    assert_eq!(body["summary"], "A greeting.");
    assert_eq!(body["cached"], false);
    assert_eq!(body["processing_time_ms"], 42);
    assert!(body.get("original_url").is_none());
}

#[tokio::test]
async fn result_of_a_completed_url_job_includes_the_original_url() {
    let (app, store, _rx) = test_app();

    let mut job = Job::queued(ContentType::Url, "https://example.com/article", "hash");
    job.status = JobStatus::Completed;
    job.summary = Some("An article.".to_string());
    job.cached = true;
    job.processing_time_ms = Some(7);
    store.create(&job).await.unwrap();

    let uri = format!("/result/{}", job.id);
    let (status, body) = send_json(app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cached"], true);
    assert_eq!(body["original_url"], "https://example.com/article");
}

#[tokio::test]
async fn health_reports_healthy_with_a_reachable_store() {
    let (app, _store, _rx) = test_app();

    let (status, body) = send_json(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["job_store"]["status"], "ok");
}
