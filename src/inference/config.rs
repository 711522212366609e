// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the generation API client

use std::env;

use crate::utils::RetryPolicy;

pub const DEFAULT_AI21_URL: &str = "https://api.ai21.com/studio/v1";
pub const DEFAULT_AI21_MODEL: &str = "jamba-large";

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Bearer token; requests go out unauthenticated when absent
    pub api_key: Option<String>,
    /// API base, `/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl GenerationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("AI21_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            base_url: env::var("AI21_URL").unwrap_or(defaults.base_url),
            model: env::var("AI21_MODEL").unwrap_or(defaults.model),
            request_timeout_secs: defaults.request_timeout_secs,
            retry: RetryPolicy::from_env(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("AI21_URL must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("AI21_MODEL must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Generation timeout must be greater than 0".to_string());
        }
        self.retry.validate()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI21_URL.to_string(),
            model: DEFAULT_AI21_MODEL.to_string(),
            request_timeout_secs: 60,
            retry: RetryPolicy::default(),
        }
    }
}
