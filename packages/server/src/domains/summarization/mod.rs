//! Summarization domain: submission validation, the summary cache, and the
//! job orchestration state machine.

pub mod cache;
pub mod processor;
pub mod submission;

pub use cache::{MemorySummaryCache, PostgresSummaryCache, SummaryCache, UnavailableSummaryCache};
pub use processor::JobProcessor;
pub use submission::{normalize, NormalizedContent, SubmitRequest, ValidationError};
