//! Kernel module - job infrastructure shared across domains.

pub mod jobs;
