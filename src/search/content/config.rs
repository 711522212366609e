// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for content fetching
//!
//! Defines settings for HTTP fetching and extracted text limits.

use std::env;

use crate::search::config::BROWSER_USER_AGENT;
use crate::utils::RetryPolicy;

/// Configuration for content fetching
#[derive(Debug, Clone)]
pub struct ContentFetchConfig {
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_secs: u64,
    /// Maximum characters of extracted text per page (default: 2000)
    pub max_chars: usize,
    /// Allow loopback/private hosts (local test servers only)
    pub allow_private_hosts: bool,
    /// Redirects followed before giving up (default: 5)
    pub max_redirects: usize,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("CONTENT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_chars: env::var("CONTENT_FETCH_MAX_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_chars),
            allow_private_hosts: env::var("CONTENT_FETCH_ALLOW_PRIVATE")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
            max_redirects: defaults.max_redirects,
            user_agent: defaults.user_agent,
            retry: RetryPolicy::from_env(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.max_chars == 0 {
            return Err("max_chars must be at least 1".to_string());
        }
        self.retry.validate()
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_chars: 2000,
            allow_private_hosts: false,
            max_redirects: 5,
            user_agent: BROWSER_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}
