//! Submission and polling endpoints for summarization jobs.

use axum::extract::{Extension, Path};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::summarization::{normalize, SubmitRequest};
use crate::kernel::jobs::{ContentType, Job, JobStatus};
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ResultResponse {
    pub job_id: Uuid,
    pub summary: String,
    pub cached: bool,
    pub processing_time_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

/// Submit content for summarization.
///
/// Creates a queued job and hands its id to the dispatch queue. Validation
/// failures never create a job.
pub async fn submit_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let normalized = normalize(&request).map_err(|e| {
        warn!(error = %e, "invalid submission");
        ApiError::Validation(e.to_string())
    })?;

    let job = Job::queued(
        normalized.content_type,
        normalized.content,
        normalized.content_hash,
    );
    state.job_store.create(&job).await?;
    info!(job_id = %job.id, content_hash = ?job.content_hash, "created job");

    state
        .queue
        .enqueue(job.id)
        .await
        .map_err(ApiError::Internal)?;
    info!(job_id = %job.id, "queued job for processing");

    Ok(Json(SubmitResponse {
        job_id: job.id,
        status: job.status,
    }))
}

/// Get the current status of a job.
pub async fn status_handler(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let job = lookup_job(&state, &job_id).await?;

    Ok(Json(StatusResponse {
        job_id: job.id,
        status: job.status,
        created_at: job.created_at,
    }))
}

/// Get the result of a completed job.
///
/// A job that exists but is not completed (including a failed one, which
/// never has a summary) answers not-ready, distinct from not-found.
pub async fn result_handler(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<ResultResponse>, ApiError> {
    let job = lookup_job(&state, &job_id).await?;

    if job.status != JobStatus::Completed {
        return Err(ApiError::NotReady);
    }

    let (Some(summary), Some(processing_time_ms)) = (job.summary.clone(), job.processing_time_ms)
    else {
        return Err(ApiError::Internal(anyhow::anyhow!(
            "completed job {} is missing its result fields",
            job.id
        )));
    };

    let original_url = match job.content_type {
        ContentType::Url => Some(job.content.clone()),
        ContentType::Text => None,
    };

    Ok(Json(ResultResponse {
        job_id: job.id,
        summary,
        cached: job.cached,
        processing_time_ms,
        original_url,
    }))
}

async fn lookup_job(state: &AppState, raw_id: &str) -> Result<Job, ApiError> {
    let Ok(id) = Uuid::parse_str(raw_id) else {
        return Err(ApiError::NotFound);
    };

    state.job_store.get(id).await?.ok_or(ApiError::NotFound)
}
