//! Best-effort summary cache keyed by content fingerprint.
//!
//! The cache is an optimization, never a source of truth: callers absorb
//! every failure, degrading a lookup error to a miss and a write error to a
//! skipped write. Entries are last-writer-wins with no expiry.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Fingerprint → summary lookup/insert.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Look up the summary stored for a fingerprint.
    async fn get(&self, content_hash: &str) -> Result<Option<String>>;

    /// Store (or overwrite) the summary for a fingerprint.
    async fn set(&self, content_hash: &str, summary: &str) -> Result<()>;
}

/// PostgreSQL-backed summary cache.
pub struct PostgresSummaryCache {
    pool: PgPool,
}

impl PostgresSummaryCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryCache for PostgresSummaryCache {
    async fn get(&self, content_hash: &str) -> Result<Option<String>> {
        let summary = sqlx::query_scalar::<_, String>(
            "SELECT summary FROM summary_cache WHERE content_hash = $1",
        )
        .bind(content_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    async fn set(&self, content_hash: &str, summary: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO summary_cache (content_hash, summary, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (content_hash) DO UPDATE SET
                summary = EXCLUDED.summary,
                updated_at = NOW()
            "#,
        )
        .bind(content_hash)
        .bind(summary)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// In-memory summary cache for tests and development.
#[derive(Default)]
pub struct MemorySummaryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySummaryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

#[async_trait]
impl SummaryCache for MemorySummaryCache {
    async fn get(&self, content_hash: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(content_hash).cloned())
    }

    async fn set(&self, content_hash: &str, summary: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(content_hash.to_string(), summary.to_string());
        Ok(())
    }
}

/// Cache double whose operations always fail, for exercising the
/// best-effort contract.
#[derive(Default)]
pub struct UnavailableSummaryCache;

impl UnavailableSummaryCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SummaryCache for UnavailableSummaryCache {
    async fn get(&self, _content_hash: &str) -> Result<Option<String>> {
        anyhow::bail!("cache unavailable")
    }

    async fn set(&self, _content_hash: &str, _summary: &str) -> Result<()> {
        anyhow::bail!("cache unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_entries_read_as_none() {
        let cache = MemorySummaryCache::new();
        assert!(cache.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entries_round_trip() {
        let cache = MemorySummaryCache::new();
        cache.set("hash", "A summary.").await.unwrap();
        assert_eq!(
            cache.get("hash").await.unwrap().as_deref(),
            Some("A summary.")
        );
    }

    #[tokio::test]
    async fn later_writes_win() {
        let cache = MemorySummaryCache::new();
        cache.set("hash", "first").await.unwrap();
        cache.set("hash", "second").await.unwrap();

        assert_eq!(cache.get("hash").await.unwrap().as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn unavailable_cache_fails_both_operations() {
        let cache = UnavailableSummaryCache::new();
        assert!(cache.get("hash").await.is_err());
        assert!(cache.set("hash", "summary").await.is_err());
    }
}
