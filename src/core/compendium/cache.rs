//! Memoizing resolve-by-URL cache.
//!
//! Facet predicates resolve the full record behind every candidate URL on every
//! recomputation. The backing data is immutable for the session, so records are
//! memoized by URL. The cache is unbounded unless a capacity is configured, in
//! which case least-recently-used records are evicted.
//!
//! Failures are never cached: a `Transport` error must stay retryable and a
//! `NotFound` costs nothing to repeat against a local table.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::error::Result;
use super::record::{ResourceRecord, ResultEntry};
use super::source::CompendiumSource;

/// Resolution cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub current_size: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Wraps any [`CompendiumSource`] with a memoizing `resolve`.
///
/// Listings pass straight through; they are only requested when seeding a
/// session or loading the facet catalogue.
pub struct CachedCompendium<S> {
    inner: S,
    cache: Mutex<LruCache<String, ResourceRecord>>,
    stats: Mutex<CacheStats>,
}

impl<S: CompendiumSource> CachedCompendium<S> {
    /// Unbounded cache: every resolved record is kept for the session.
    pub fn new(inner: S) -> Self {
        Self::with_cache(inner, LruCache::unbounded())
    }

    /// Bounded cache. A capacity of zero is treated as one.
    pub fn with_capacity(inner: S, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self::with_cache(inner, LruCache::new(capacity))
    }

    fn with_cache(inner: S, cache: LruCache<String, ResourceRecord>) -> Self {
        Self {
            inner,
            cache: Mutex::new(cache),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn stats(&self) -> CacheStats {
        *self.stats.lock().await
    }

    pub async fn clear(&self) {
        self.cache.lock().await.clear();
        self.stats.lock().await.current_size = 0;
    }
}

#[async_trait]
impl<S: CompendiumSource> CompendiumSource for CachedCompendium<S> {
    fn id(&self) -> &str {
        self.inner.id()
    }

    async fn resolve(&self, url: &str) -> Result<ResourceRecord> {
        if let Some(record) = self.cache.lock().await.get(url) {
            self.stats.lock().await.hits += 1;
            return Ok(record.clone());
        }
        self.stats.lock().await.misses += 1;

        let record = self.inner.resolve(url).await?;

        let mut cache = self.cache.lock().await;
        let evicted = cache.push(url.to_string(), record.clone());
        let mut stats = self.stats.lock().await;
        if let Some((evicted_key, _)) = evicted {
            if evicted_key != url {
                stats.evictions += 1;
            }
        }
        stats.current_size = cache.len();

        Ok(record)
    }

    async fn list_category(&self, path: &str) -> Result<Vec<ResultEntry>> {
        self.inner.list_category(path).await
    }
}
