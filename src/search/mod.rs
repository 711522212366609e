// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Live web search
//!
//! Resolves a user query to candidate page URLs by scraping public result
//! pages, and fetches those pages as plain text.
//!
//! Key features:
//! - Freshness-biased query rewriting (stop words dropped, year appended)
//! - Google and DuckDuckGo result-page providers with failover
//! - Per-URL content extraction that degrades to empty text

pub mod config;
pub mod content;
pub mod duckduckgo;
pub mod google;
pub mod provider;
pub mod query_rewriter;
pub mod result_page;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use content::{ContentFetchConfig, ContentFetcher, FetchError, PageExtractor};
pub use provider::{SearchProvider, UrlResolver};
pub use query_rewriter::QueryRewriter;
pub use service::SearchService;
pub use types::{SearchError, SearchResult};
