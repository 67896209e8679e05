//! Mock implementations for testing without real network or LLM calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::ai::Summarizer;
use crate::error::{FetchError, FetchResult, SummarizeError, SummarizeResult};
use crate::fetcher::ContentFetcher;

/// A mock fetcher returning predefined page text by URL.
///
/// Unknown URLs fail with a 404-shaped error; `fail_times` makes the next
/// calls fail with a 503 regardless of URL, for exercising retry behavior.
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures_remaining: Arc<Mutex<u32>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined page.
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), text.into());
        self
    }

    /// Make the next `n` fetches fail with a transport-style error.
    pub fn fail_times(self, n: u32) -> Self {
        *self.failures_remaining.lock().unwrap() = n;
        self
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.lock().unwrap().push(url.to_string());

        {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 503,
                });
            }
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// A mock summarizer with a configurable response and scripted failures.
pub struct MockSummarizer {
    summary: Arc<RwLock<String>>,
    failures_remaining: Arc<Mutex<u32>>,
    always_fail: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            summary: Arc::new(RwLock::new("A summary.".to_string())),
            failures_remaining: Arc::new(Mutex::new(0)),
            always_fail: Arc::new(Mutex::new(false)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the summary returned on success.
    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        *self.summary.write().unwrap() = summary.into();
        self
    }

    /// Make the next `n` calls fail with a backend-style error.
    pub fn fail_times(self, n: u32) -> Self {
        *self.failures_remaining.lock().unwrap() = n;
        self
    }

    /// Make every call fail.
    pub fn always_failing() -> Self {
        let mock = Self::new();
        *mock.always_fail.lock().unwrap() = true;
        mock
    }

    /// Input texts summarized so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of summarization calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str) -> SummarizeResult<String> {
        self.calls.lock().unwrap().push(text.to_string());

        if *self.always_fail.lock().unwrap() {
            return Err(scripted_failure());
        }

        {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(scripted_failure());
            }
        }

        Ok(self.summary.read().unwrap().clone())
    }
}

fn scripted_failure() -> SummarizeError {
    SummarizeError::Api {
        status: 503,
        message: "scripted backend failure".to_string(),
    }
}
