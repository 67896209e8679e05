//! Dispatch queue: hands job ids to the asynchronous worker.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Queue seam between the submission path and the worker.
///
/// Delivery is at-least-once from the worker's point of view; duplicate
/// delivery is tolerated because job processing is idempotent.
#[async_trait]
pub trait DispatchQueue: Send + Sync {
    /// Enqueue a job id for asynchronous processing.
    async fn enqueue(&self, job_id: Uuid) -> Result<()>;
}

/// In-process queue backed by an unbounded channel.
///
/// The receiver half feeds a [`JobWorker`](super::JobWorker) in the same
/// process. A dropped receiver makes enqueue fail, which the submission
/// endpoint surfaces as a server error.
#[derive(Clone)]
pub struct InProcessQueue {
    tx: mpsc::UnboundedSender<Uuid>,
}

impl InProcessQueue {
    /// Create a queue and the receiver the worker consumes from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Uuid>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl DispatchQueue for InProcessQueue {
    async fn enqueue(&self, job_id: Uuid) -> Result<()> {
        self.tx
            .send(job_id)
            .map_err(|_| anyhow::anyhow!("dispatch queue is closed"))?;
        Ok(())
    }
}
