//! In-memory job store for tests and development.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::job::Job;
use super::store::{JobStore, StoreError, StoreResult};

/// In-memory [`JobStore`].
///
/// Not suitable for production as data is lost on restart. Supports scripted
/// transient write failures so retry behavior can be exercised without a real
/// database.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
    write_failures: Mutex<u32>,
}

impl MemoryJobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` writes fail with a transient error.
    pub fn fail_writes(&self, n: u32) {
        *self.write_failures.lock().unwrap() = n;
    }

    /// Number of stored jobs.
    pub fn len(&self) -> usize {
        self.jobs.read().unwrap().len()
    }

    /// Whether the store holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.read().unwrap().is_empty()
    }

    fn take_write_failure(&self) -> bool {
        let mut remaining = self.write_failures.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }

    fn transient() -> StoreError {
        StoreError::Transient(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: &Job) -> StoreResult<()> {
        if self.take_write_failure() {
            return Err(Self::transient());
        }
        self.jobs.write().unwrap().insert(job.id, job.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Job>> {
        Ok(self.jobs.read().unwrap().get(&id).cloned())
    }

    async fn update(&self, job: &Job) -> StoreResult<()> {
        if self.take_write_failure() {
            return Err(Self::transient());
        }
        let mut updated = job.clone();
        updated.updated_at = Utc::now();
        self.jobs.write().unwrap().insert(job.id, updated);
        Ok(())
    }
}
