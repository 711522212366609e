// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Rewrites queries for freshness and tries providers in priority order.

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::duckduckgo::DuckDuckGoProvider;
use super::google::GoogleProvider;
use super::provider::{SearchProvider, UrlResolver};
use super::query_rewriter::QueryRewriter;
use super::types::SearchError;

/// Resolves user queries to candidate URLs through the configured engines
pub struct SearchService {
    providers: Vec<Box<dyn SearchProvider>>,
    rewriter: QueryRewriter,
}

impl SearchService {
    /// Create a search service from configuration
    ///
    /// The preferred engine goes first; the other one is kept as fallback.
    pub fn new(config: &SearchConfig, rewriter: QueryRewriter) -> Result<Self, SearchError> {
        let mut providers: Vec<Box<dyn SearchProvider>> = vec![
            Box::new(GoogleProvider::new(config)?),
            Box::new(DuckDuckGoProvider::new(config)?),
        ];
        providers.sort_by_key(|p| (p.name() != config.preferred_provider, p.priority()));
        debug!(
            "Search providers: {}",
            providers.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            providers,
            rewriter,
        })
    }

    /// Build a service over explicit providers, sorted by priority
    pub fn with_providers(
        mut providers: Vec<Box<dyn SearchProvider>>,
        rewriter: QueryRewriter,
    ) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self {
            providers,
            rewriter,
        }
    }

    /// Get list of provider names in the order they are tried
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Search with failover, returning the first non-empty link list
    ///
    /// An engine that answers with no links counts as a miss; `Ok(vec![])`
    /// means every engine answered and none had links.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let engine_query = self.rewriter.rewrite(query);
        let start = Instant::now();
        let mut answered = false;

        for provider in &self.providers {
            debug!("Trying search provider: {}", provider.name());

            match provider.search(&engine_query, limit).await {
                Ok(links) if links.is_empty() => {
                    answered = true;
                    warn!(
                        "Search provider {} returned no links, trying next",
                        provider.name()
                    );
                }
                Ok(mut links) => {
                    links.truncate(limit);
                    info!(
                        "Search complete: {} links from {} in {}ms",
                        links.len(),
                        provider.name(),
                        start.elapsed().as_millis()
                    );
                    return Ok(links);
                }
                Err(e) => {
                    warn!(
                        "Search provider {} failed: {}, trying next",
                        provider.name(),
                        e
                    );
                }
            }
        }

        if answered {
            return Ok(Vec::new());
        }
        Err(SearchError::ProviderUnavailable {
            provider: "all".to_string(),
        })
    }
}

#[async_trait]
impl UrlResolver for SearchService {
    async fn resolve(&self, query: &str, limit: usize) -> Vec<String> {
        match self.search(query, limit).await {
            Ok(links) => links,
            Err(e) => {
                warn!("Search for '{}' yielded no links: {}", query, e);
                Vec::new()
            }
        }
    }
}
