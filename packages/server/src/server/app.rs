//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::kernel::jobs::{DispatchQueue, JobStore};
use crate::server::routes::{health_handler, result_handler, status_handler, submit_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub job_store: Arc<dyn JobStore>,
    pub queue: Arc<dyn DispatchQueue>,
}

/// Build the Axum application router
pub fn build_app(job_store: Arc<dyn JobStore>, queue: Arc<dyn DispatchQueue>) -> Router {
    let state = AppState { job_store, queue };

    Router::new()
        .route("/submit", post(submit_handler))
        .route("/status/:job_id", get(status_handler))
        .route("/result/:job_id", get(result_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
