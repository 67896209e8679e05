//! Job worker service: consumes dispatched job ids and drives the processor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::domains::summarization::JobProcessor;

/// Configuration for the job worker.
#[derive(Debug, Clone)]
pub struct JobWorkerConfig {
    /// Worker ID for this instance
    pub worker_id: String,
    /// How long to wait for in-flight jobs during shutdown
    pub drain_timeout: Duration,
}

impl Default for JobWorkerConfig {
    fn default() -> Self {
        Self {
            worker_id: format!("worker-{}", Uuid::new_v4()),
            drain_timeout: Duration::from_secs(30),
        }
    }
}

impl JobWorkerConfig {
    /// Create a new config with a specific worker ID.
    pub fn with_worker_id(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            ..Default::default()
        }
    }
}

/// Long-running service that pulls job ids off the dispatch queue and
/// processes each one in its own task.
///
/// Processing errors are logged, never propagated: a failed job already holds
/// its terminal state in the store, and the worker must keep serving the
/// queue.
pub struct JobWorker {
    rx: UnboundedReceiver<Uuid>,
    processor: Arc<JobProcessor>,
    config: JobWorkerConfig,
}

impl JobWorker {
    /// Create a worker with the default configuration.
    pub fn new(rx: UnboundedReceiver<Uuid>, processor: Arc<JobProcessor>) -> Self {
        Self {
            rx,
            processor,
            config: JobWorkerConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(
        rx: UnboundedReceiver<Uuid>,
        processor: Arc<JobProcessor>,
        config: JobWorkerConfig,
    ) -> Self {
        Self {
            rx,
            processor,
            config,
        }
    }

    /// Run until the queue closes or shutdown is signalled.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(worker_id = %self.config.worker_id, "job worker starting");

        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                maybe_id = self.rx.recv() => {
                    let Some(job_id) = maybe_id else { break };

                    // Reap finished tasks so the set does not grow unbounded.
                    while in_flight.try_join_next().is_some() {}

                    let processor = Arc::clone(&self.processor);
                    in_flight.spawn(async move {
                        if let Err(e) = processor.process(job_id).await {
                            error!(job_id = %job_id, error = %e, "job processing failed");
                        }
                    });
                }
            }
        }

        // Let in-flight jobs reach a terminal state before stopping.
        if !in_flight.is_empty() {
            info!(count = in_flight.len(), "waiting for in-flight jobs");
            let drain = async {
                while in_flight.join_next().await.is_some() {}
            };
            if tokio::time::timeout(self.config.drain_timeout, drain)
                .await
                .is_err()
            {
                error!("drain timeout elapsed with jobs still running");
            }
        }

        info!(worker_id = %self.config.worker_id, "job worker stopped");
    }
}
