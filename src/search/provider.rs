// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definitions

use async_trait::async_trait;

use super::types::SearchError;

/// A search engine that turns a query into result-page links
///
/// Multiple providers can be configured with automatic failover.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search and return up to `num_results` absolute links in page order
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Get provider priority (lower = preferred)
    fn priority(&self) -> u8 {
        100
    }
}

/// Resolves a user query to candidate URLs without ever failing
///
/// Network and parse failures surface as an empty list.
#[async_trait]
pub trait UrlResolver: Send + Sync {
    async fn resolve(&self, query: &str, limit: usize) -> Vec<String>;
}
