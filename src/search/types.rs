// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A candidate page: a result-page link plus whatever text was extracted from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Absolute URL of the page
    pub url: String,
    /// Extracted visible text; None or empty when extraction failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SearchResult {
    pub fn new(url: impl Into<String>, content: Option<String>) -> Self {
        Self {
            url: url.into(),
            content,
        }
    }

    /// Length in characters of the extracted content (0 when absent)
    pub fn content_chars(&self) -> usize {
        self.content
            .as_deref()
            .map(|c| c.chars().count())
            .unwrap_or(0)
    }
}

/// Errors that can occur while querying a search engine
#[derive(Debug, Error)]
pub enum SearchError {
    /// Non-success HTTP status or transport error from the engine
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 when no response was received)
        status: u16,
        message: String,
    },

    #[error("Search timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },
}

impl SearchError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Timeout { .. } => true,
            SearchError::ApiError { status, .. } => {
                *status == 0 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}
