//! Typed errors for the summarization library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match on
//! the concrete failure and decide what to retry.

use thiserror::Error;

/// Errors that can occur while resolving content from a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Response body could not be read
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors that can occur while summarizing text.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Transport-level failure talking to the backend
    #[error("summarization backend request failed: {0}")]
    Backend(#[source] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("summarization backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Backend answered 2xx but the body did not parse
    #[error("malformed summarization response: {0}")]
    MalformedResponse(#[source] reqwest::Error),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for summarization operations.
pub type SummarizeResult<T> = std::result::Result<T, SummarizeError>;
