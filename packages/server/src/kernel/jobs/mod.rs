//! Job infrastructure for asynchronous summarization work.
//!
//! - [`Job`] - durable job record and its state-machine fields
//! - [`JobStore`] - persistence seam (Postgres in production, memory in tests)
//! - [`DispatchQueue`] - hands job ids to the asynchronous worker
//! - [`JobWorker`] - long-running service that drives the processor
//!
//! # Architecture
//!
//! ```text
//! POST /submit
//!     │
//!     ├─► JobStore.create (status = queued)
//!     └─► DispatchQueue.enqueue(job_id)
//!
//! JobWorker
//!     │
//!     ├─► Receive job_id from the queue
//!     └─► JobProcessor.process(job_id)
//!             └─► cache probe / fetch / summarize / persist terminal state
//! ```
//!
//! Business logic stays in `domains::summarization`; this module only
//! provides the infrastructure.

mod job;
mod queue;
mod store;
pub mod testing;
mod worker;

pub use job::{ContentType, Job, JobStatus};
pub use queue::{DispatchQueue, InProcessQueue};
pub use store::{JobStore, PostgresJobStore, RetryingJobStore, StoreError, StoreResult};
pub use worker::{JobWorker, JobWorkerConfig};
