// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// RAG (Retrieval-Augmented Generation) module
// Live web retrieval distilled into bounded, source-attributed contexts

pub mod builder;
pub mod cache;
pub mod config;
pub mod format;
pub mod verifier;

use async_trait::async_trait;

/// Anything that can answer a query with a display-ready context
///
/// Implementations never fail: missing evidence is expressed in the
/// returned text (see [`format::NOT_FOUND_MARKER`]).
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn get_relevant_context(&self, query: &str) -> String;
}

pub use builder::{ContextBuilder, FanOutReport};
pub use cache::{cache_key, CacheStats, RetrievalCache};
pub use config::RetrievalConfig;
pub use format::{
    clean_content, extract_domain, insufficient_information, ContextFormat, NOT_FOUND_MARKER,
    TRUNCATION_MARKER,
};
pub use verifier::{FactVerification, FactVerifier, Verdict};
