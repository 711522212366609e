// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for context building and the retrieval cache

use std::env;

use super::format::TRUNCATION_MARKER;

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Maximum characters in an assembled context (default: 4000)
    pub context_window: usize,
    /// Candidate URLs requested from search (default: 5)
    pub max_sources: usize,
    /// Extracted text must be longer than this to count (default: 50)
    pub min_content_chars: usize,
    /// Per-source cap after cleaning (default: 800)
    pub source_chars: usize,
    /// Timeout for one extraction task in the fan-out (default: 12)
    pub task_timeout_secs: u64,
    /// Retrieval cache capacity in entries (default: 512)
    pub cache_capacity: usize,
    /// Retrieval cache TTL in seconds (default: 900)
    pub cache_ttl_secs: u64,
}

impl RetrievalConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            context_window: env::var("RAG_CONTEXT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.context_window),
            max_sources: env::var("RAG_MAX_SOURCES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_sources),
            min_content_chars: env::var("RAG_MIN_CONTENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_content_chars),
            source_chars: env::var("RAG_SOURCE_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.source_chars),
            task_timeout_secs: env::var("RAG_TASK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.task_timeout_secs),
            cache_capacity: env::var("RAG_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_capacity),
            cache_ttl_secs: env::var("RAG_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.context_window <= TRUNCATION_MARKER.chars().count() {
            return Err("context_window must exceed the truncation marker".to_string());
        }
        if self.max_sources == 0 {
            return Err("max_sources must be at least 1".to_string());
        }
        if self.source_chars == 0 {
            return Err("source_chars must be at least 1".to_string());
        }
        if self.task_timeout_secs == 0 {
            return Err("task_timeout_secs must be at least 1".to_string());
        }
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be at least 1".to_string());
        }
        if self.cache_ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            context_window: 4000,
            max_sources: 5,
            min_content_chars: 50,
            source_chars: 800,
            task_timeout_secs: 12,
            cache_capacity: 512,
            cache_ttl_secs: 900,
        }
    }
}
