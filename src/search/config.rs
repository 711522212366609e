// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

use crate::utils::RetryPolicy;

pub const DEFAULT_GOOGLE_URL: &str = "https://www.google.com/search";
pub const DEFAULT_DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com/html/";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for result-page search engines
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Preferred engine: "google" or "duckduckgo"
    pub preferred_provider: String,
    /// Google result page endpoint
    pub google_url: String,
    /// DuckDuckGo HTML endpoint
    pub duckduckgo_url: String,
    pub user_agent: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            preferred_provider: env::var("SEARCH_PROVIDER")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.preferred_provider),
            google_url: env::var("SEARCH_GOOGLE_URL").unwrap_or(defaults.google_url),
            duckduckgo_url: env::var("SEARCH_DUCKDUCKGO_URL").unwrap_or(defaults.duckduckgo_url),
            user_agent: defaults.user_agent,
            request_timeout_secs: env::var("SEARCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            retry: RetryPolicy::from_env(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !["google", "duckduckgo"].contains(&self.preferred_provider.as_str()) {
            return Err(format!(
                "Unknown search provider: {}",
                self.preferred_provider
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("Search timeout must be greater than 0".to_string());
        }
        self.retry.validate()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "google".to_string(),
            google_url: DEFAULT_GOOGLE_URL.to_string(),
            duckduckgo_url: DEFAULT_DUCKDUCKGO_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            request_timeout_secs: 10,
            retry: RetryPolicy::default(),
        }
    }
}
