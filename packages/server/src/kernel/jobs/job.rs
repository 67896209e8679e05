//! Job model for asynchronous summarization work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use typed_builder::TypedBuilder;
use uuid::Uuid;

// ============================================================================
// Enums
// ============================================================================

/// Lifecycle states of a job.
///
/// `Queued` and `Processing` are non-terminal; `Completed` and `Failed` are
/// terminal and never transition further. Retrying a failed job means
/// creating a new job, not resurrecting the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Kinds of content a job can summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Url,
}

// ============================================================================
// Job Model
// ============================================================================

/// Durable record of a summarization job.
///
/// `content_hash`, `content_type` and `content` never change after creation.
/// The processor owns the remaining fields while a dispatched job is being
/// driven to a terminal state; before and after that the record belongs to
/// the store alone.
#[derive(FromRow, Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Job {
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,

    // Immutable identity of the work item
    #[builder(default, setter(strip_option))]
    pub content_hash: Option<String>,
    pub content_type: ContentType,
    pub content: String,

    // Outcome, written only by the processor
    #[builder(default, setter(strip_option))]
    pub summary: Option<String>,
    #[builder(default)]
    pub status: JobStatus,
    #[builder(default)]
    pub cached: bool,
    #[builder(default, setter(strip_option))]
    pub processing_time_ms: Option<i64>,

    // Timestamps
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a queued job for freshly submitted content.
    pub fn queued(
        content_type: ContentType,
        content: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self::builder()
            .content_type(content_type)
            .content(content)
            .content_hash(content_hash)
            .build()
    }
}
