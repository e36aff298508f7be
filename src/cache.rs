// src/cache.rs
//! Time-boxed memoization of fetched collections.
//!
//! The key space is exactly the `users` and `posts` collections, so the
//! cache is two typed slots rather than a keyed map. Entries are replaced
//! wholesale on refresh and live for the lifetime of the engine instance.

use crate::utils::{Post, User};
use log::debug;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

/// Configuration for the response cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for cache entries
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(5000),
        }
    }
}

impl CacheConfig {
    pub fn with_ttl_ms(ttl_ms: u64) -> Self {
        Self {
            ttl: Duration::from_millis(ttl_ms),
        }
    }
}

/// The two collections the cache knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Users,
    Posts,
}

/// Cache entry storing a fetched collection with its fetch time
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    /// Check if the cache entry is still valid based on TTL
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// One overwrite-only slot for a collection type.
#[derive(Debug, Default)]
struct CacheSlot<T> {
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> CacheSlot<T> {
    async fn fresh_value(&self, ttl: Duration) -> Option<T> {
        let guard = self.entry.lock().await;
        guard
            .as_ref()
            .filter(|entry| entry.is_fresh(ttl))
            .map(|entry| entry.value.clone())
    }

    async fn store(&self, value: T) {
        let mut guard = self.entry.lock().await;
        *guard = Some(CacheEntry::new(value));
    }

    async fn is_fresh(&self, ttl: Duration) -> bool {
        let guard = self.entry.lock().await;
        guard.as_ref().is_some_and(|entry| entry.is_fresh(ttl))
    }
}

/// Cache hit/miss counters for diagnostics
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheMetrics {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
}

/// In-memory TTL cache for upstream collections, owned by the fetcher
/// instance that uses it. Comments are intentionally never cached.
#[derive(Debug, Default)]
pub struct ResponseCache {
    config: CacheConfig,
    users: CacheSlot<Vec<User>>,
    posts: CacheSlot<Vec<Post>>,
    metrics: CacheMetrics,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    pub async fn fresh_users(&self) -> Option<Vec<User>> {
        let value = self.users.fresh_value(self.config.ttl).await;
        self.record(CollectionKind::Users, value.is_some());
        value
    }

    pub async fn store_users(&self, users: Vec<User>) {
        self.users.store(users).await;
    }

    pub async fn fresh_posts(&self) -> Option<Vec<Post>> {
        let value = self.posts.fresh_value(self.config.ttl).await;
        self.record(CollectionKind::Posts, value.is_some());
        value
    }

    pub async fn store_posts(&self, posts: Vec<Post>) {
        self.posts.store(posts).await;
    }

    pub async fn is_fresh(&self, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Users => self.users.is_fresh(self.config.ttl).await,
            CollectionKind::Posts => self.posts.is_fresh(self.config.ttl).await,
        }
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn record(&self, kind: CollectionKind, hit: bool) {
        if hit {
            self.metrics.record_hit();
            debug!("Cache HIT for {:?}", kind);
        } else {
            self.metrics.record_miss();
            debug!("Cache MISS for {:?}", kind);
        }
    }
}
