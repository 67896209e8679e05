//! Content Resolution and Summarization Library
//!
//! The building blocks for turning a piece of content into a summary:
//! fetching a URL and reducing it to readable text, calling an
//! OpenAI-compatible backend to summarize it, and the bounded-retry policy
//! wrapped around both of those unreliable calls.
//!
//! The library is deliberately storage-free: job records, caching, and
//! orchestration live in the application, behind trait seams that accept the
//! implementations here.
//!
//! # Modules
//!
//! - [`ai`] - The [`Summarizer`](ai::Summarizer) seam and the OpenAI-compatible client
//! - [`fetcher`] - The [`ContentFetcher`](fetcher::ContentFetcher) seam and the HTTP implementation
//! - [`retry`] - Bounded fixed-delay retry policy
//! - [`error`] - Typed errors for fetch and summarization failures
//! - [`testing`] - Mock implementations for tests

pub mod ai;
pub mod error;
pub mod fetcher;
pub mod retry;
pub mod testing;

pub use ai::{OpenAi, Summarizer};
pub use error::{FetchError, FetchResult, SummarizeError, SummarizeResult};
pub use fetcher::{ContentFetcher, HttpFetcher};
pub use retry::RetryPolicy;
