//! LLM summarization clients.

mod openai;

pub use openai::{OpenAi, SUMMARIZE_TIMEOUT};

use async_trait::async_trait;

use crate::error::SummarizeResult;

/// Summarization backend seam.
///
/// Implementations wrap a specific provider and handle its prompting and
/// response parsing.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary of `text`.
    ///
    /// An empty summary is a valid outcome: a backend with nothing to say is
    /// not a failure.
    async fn summarize(&self, text: &str) -> SummarizeResult<String>;
}
