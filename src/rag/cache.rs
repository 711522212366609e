// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval cache
//!
//! Memoizes assembled contexts keyed by a SHA-256 digest of the raw query.
//! Entries are bounded by an LRU capacity and expire after a TTL.

use async_trait::async_trait;
use lru::LruCache;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use super::config::RetrievalConfig;
use super::ContextSource;

struct CachedContext {
    context: String,
    inserted_at: Instant,
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Entries currently held (expired ones included until touched)
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Deterministic cache key for a raw query string
pub fn cache_key(query: &str) -> String {
    hex::encode(Sha256::digest(query.as_bytes()))
}

/// LRU+TTL memoization in front of any [`ContextSource`]
pub struct RetrievalCache {
    source: Arc<dyn ContextSource>,
    entries: Mutex<LruCache<String, CachedContext>>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RetrievalCache {
    /// Create a cache; a zero capacity is raised to one
    pub fn new(source: Arc<dyn ContextSource>, capacity: usize, ttl: Duration) -> Self {
        let capacity = capacity.max(1);
        let bound = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            entries: Mutex::new(LruCache::new(bound)),
            capacity,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(source: Arc<dyn ContextSource>, config: &RetrievalConfig) -> Self {
        Self::new(
            source,
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    /// Fresh cached context for `query`, if any
    pub async fn get(&self, query: &str) -> Option<String> {
        let key = cache_key(query);
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(&key) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => {
                return Some(entry.context.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(&key);
        }
        None
    }

    /// Store `context` for `query`, replacing any previous entry
    pub async fn insert(&self, query: &str, context: String) {
        let mut entries = self.entries.lock().await;
        entries.put(
            cache_key(query),
            CachedContext {
                context,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Return the cached context or build, store and return a new one
    pub async fn get_or_build(&self, query: &str) -> String {
        if let Some(context) = self.get(query).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Retrieval cache hit for '{}'", query);
            return context;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Retrieval cache miss for '{}'", query);
        let context = self.source.get_relevant_context(query).await;
        self.insert(query, context.clone()).await;
        context
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        CacheStats {
            entries: entries.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[async_trait]
impl ContextSource for RetrievalCache {
    async fn get_relevant_context(&self, query: &str) -> String {
        self.get_or_build(query).await
    }
}
