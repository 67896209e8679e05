//! Job persistence: the store seam, the Postgres implementation, and the
//! retry decorator applied to writes.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use summarize::retry::{self, RetryPolicy};

use super::job::Job;

/// Errors from the durable job store.
///
/// Transient errors (connectivity to the backend) are worth retrying; fatal
/// errors (constraint violations, decode failures) are not.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transient store error: {0}")]
    Transient(#[source] sqlx::Error),

    #[error("store error: {0}")]
    Fatal(#[source] sqlx::Error),
}

impl StoreError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }

    fn classify(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Transient(err),
            _ => StoreError::Fatal(err),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable record store for jobs.
///
/// `create` and `update` are full-record writes keyed by id. `get` returning
/// `None` is a valid terminal outcome ("not found") and is never retried.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: &Job) -> StoreResult<()>;
    async fn get(&self, id: Uuid) -> StoreResult<Option<Job>>;
    async fn update(&self, job: &Job) -> StoreResult<()>;
}

/// PostgreSQL-backed job store.
pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PostgresJobStore {
    async fn create(&self, job: &Job) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, content_hash, content_type, content, summary, status,
                cached, processing_time_ms, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(job.id)
        .bind(&job.content_hash)
        .bind(job.content_type)
        .bind(&job.content)
        .bind(&job.summary)
        .bind(job.status)
        .bind(job.cached)
        .bind(job.processing_time_ms)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::classify)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, content_hash, content_type, content, summary, status,
                   cached, processing_time_ms, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::classify)?;

        Ok(job)
    }

    async fn update(&self, job: &Job) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE jobs SET
                summary = $1, status = $2, cached = $3,
                processing_time_ms = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&job.summary)
        .bind(job.status)
        .bind(job.cached)
        .bind(job.processing_time_ms)
        .bind(job.id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::classify)?;

        Ok(())
    }
}

/// Retry decorator for a [`JobStore`].
///
/// Applies the bounded store-write policy to `create` and `update`, retrying
/// transient errors only. `get` passes through untouched: an absent record is
/// an answer, not a failure.
pub struct RetryingJobStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: JobStore> RetryingJobStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            policy: retry::STORE_WRITE,
        }
    }

    /// Override the write-retry policy.
    pub fn with_policy(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<S: JobStore> JobStore for RetryingJobStore<S> {
    async fn create(&self, job: &Job) -> StoreResult<()> {
        self.policy
            .retry_if(|| self.inner.create(job), StoreError::is_transient)
            .await
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Job>> {
        self.inner.get(id).await
    }

    async fn update(&self, job: &Job) -> StoreResult<()> {
        self.policy
            .retry_if(|| self.inner.update(job), StoreError::is_transient)
            .await
    }
}
