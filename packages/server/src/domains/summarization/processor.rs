//! Job orchestration: the state machine driving a dispatched job from the
//! queue to a terminal state.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use uuid::Uuid;

use summarize::ai::Summarizer;
use summarize::fetcher::ContentFetcher;
use summarize::retry::{self, RetryPolicy};

use super::cache::SummaryCache;
use crate::kernel::jobs::{ContentType, Job, JobStatus, JobStore};

/// Drives a job from dispatch to a terminal state.
///
/// Every collaborator is injected, so the processor is stateless and safe to
/// share across worker tasks. Re-processing a terminal job recomputes and
/// overwrites the same values: dispatch is at-least-once, processing is
/// idempotent.
pub struct JobProcessor {
    store: Arc<dyn JobStore>,
    cache: Arc<dyn SummaryCache>,
    fetcher: Arc<dyn ContentFetcher>,
    summarizer: Arc<dyn Summarizer>,
    external_retry: RetryPolicy,
}

impl JobProcessor {
    pub fn new(
        store: Arc<dyn JobStore>,
        cache: Arc<dyn SummaryCache>,
        fetcher: Arc<dyn ContentFetcher>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            store,
            cache,
            fetcher,
            summarizer,
            external_retry: retry::EXTERNAL_CALL,
        }
    }

    /// Override the retry policy applied to fetch and summarize calls.
    pub fn with_external_retry(mut self, policy: RetryPolicy) -> Self {
        self.external_retry = policy;
        self
    }

    /// Process a dispatched job id through the full state machine.
    ///
    /// Fetch and summarization failures are absorbed into a `Failed` terminal
    /// state; only store errors on the persists propagate to the caller.
    pub async fn process(&self, job_id: Uuid) -> Result<()> {
        let started = Instant::now();

        let Some(mut job) = self
            .store
            .get(job_id)
            .await
            .context("loading dispatched job")?
        else {
            // Stale dispatch: there is no record to update.
            warn!(job_id = %job_id, "dispatched job not found");
            return Ok(());
        };

        // Cache probe. A cache failure is a miss, never a job failure.
        if let Some(summary) = self.probe_cache(&job).await {
            job.summary = Some(summary);
            job.status = JobStatus::Completed;
            job.cached = true;
            job.processing_time_ms = Some(elapsed_ms(started));
            self.store
                .update(&job)
                .await
                .context("persisting cache hit")?;
            info!(job_id = %job_id, "job completed from cache");
            return Ok(());
        }

        // Durably visible before any slow external call, so status polls see
        // reality instead of a stale "queued".
        job.status = JobStatus::Processing;
        job.cached = false;
        self.store
            .update(&job)
            .await
            .context("marking job processing")?;

        match self.run_pipeline(&job).await {
            Ok(summary) => {
                job.summary = Some(summary.clone());
                job.status = JobStatus::Completed;

                // Best-effort cache write; losing it costs a recompute later.
                if let Some(hash) = &job.content_hash {
                    if let Err(e) = self.cache.set(hash, &summary).await {
                        warn!(job_id = %job_id, error = %e, "cache write failed");
                    }
                }

                job.processing_time_ms = Some(elapsed_ms(started));
                self.store
                    .update(&job)
                    .await
                    .context("persisting completed job")?;
                info!(
                    job_id = %job_id,
                    processing_time_ms = job.processing_time_ms,
                    "job completed"
                );
            }
            Err(e) => {
                error!(job_id = %job_id, error = %e, "job processing failed");
                job.status = JobStatus::Failed;
                // No partial summary; elapsed time is only recorded for
                // pipelines that completed.
                self.store
                    .update(&job)
                    .await
                    .context("persisting failed job")?;
            }
        }

        Ok(())
    }

    /// Resolve content and summarize it, with bounded retries on both calls.
    async fn run_pipeline(&self, job: &Job) -> Result<String> {
        let text = match job.content_type {
            ContentType::Url => self
                .external_retry
                .retry(|| self.fetcher.fetch(&job.content))
                .await
                .context("resolving URL content")?,
            ContentType::Text => job.content.clone(),
        };

        let summary = self
            .external_retry
            .retry(|| self.summarizer.summarize(&text))
            .await
            .context("summarizing content")?;

        Ok(summary)
    }

    async fn probe_cache(&self, job: &Job) -> Option<String> {
        let hash = job.content_hash.as_deref()?;
        match self.cache.get(hash).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(content_hash = %hash, error = %e, "cache lookup failed, treating as miss");
                None
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::summarization::cache::MemorySummaryCache;
    use crate::kernel::jobs::testing::MemoryJobStore;
    use summarize::testing::{MockFetcher, MockSummarizer};

    fn processor_with(
        store: Arc<MemoryJobStore>,
        cache: Arc<dyn SummaryCache>,
        summarizer: Arc<MockSummarizer>,
    ) -> JobProcessor {
        JobProcessor::new(store, cache, Arc::new(MockFetcher::new()), summarizer)
    }

    #[tokio::test]
    async fn stale_dispatch_is_a_silent_no_op() {
        let store = Arc::new(MemoryJobStore::new());
        let processor = processor_with(
            store.clone(),
            Arc::new(MemorySummaryCache::new()),
            Arc::new(MockSummarizer::new()),
        );

        processor.process(Uuid::new_v4()).await.unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn text_job_skips_the_fetcher() {
        let store = Arc::new(MemoryJobStore::new());
        let fetcher = Arc::new(MockFetcher::new());
        let summarizer = Arc::new(MockSummarizer::new().with_summary("A greeting."));
        let processor = JobProcessor::new(
            store.clone(),
            Arc::new(MemorySummaryCache::new()),
            fetcher.clone(),
            summarizer,
        );

        let job = Job::queued(ContentType::Text, "hello world", "hash");
        store.create(&job).await.unwrap();
        processor.process(job.id).await.unwrap();

        let done = store.get(job.id).await.unwrap().unwrap();
        assert_eq!(done.status, JobStatus::Completed);
        assert_eq!(done.summary.as_deref(), Some("A greeting."));
        assert_eq!(fetcher.call_count(), 0);
    }
}
