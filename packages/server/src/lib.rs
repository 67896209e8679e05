// Async Summarizer API - server core
//
// Accepts text or URL submissions, summarizes them asynchronously through an
// LLM backend, and serves results over a polling HTTP API. Job lifecycle
// infrastructure lives in kernel/, business logic in domains/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;
