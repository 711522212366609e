// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google result-page search provider
//!
//! Scrapes the public HTML result page. No API key required.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::result_page::extract_result_links;
use super::types::SearchError;
use crate::utils::{retry_async, RetryPolicy};

const ENGINE_MARKER: &str = "google";

/// Google HTML search provider
pub struct GoogleProvider {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl GoogleProvider {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SearchError::ProviderUnavailable {
                provider: format!("google ({})", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.google_url.clone(),
            timeout_ms: config.request_timeout_secs * 1000,
            retry: config.retry.clone(),
        })
    }

    async fn fetch_result_page(&self, query: &str, num_results: usize) -> Result<String, SearchError> {
        let num = num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("num", num.as_str())])
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_ms))?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "Google request failed".to_string(),
            });
        }

        response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for GoogleProvider {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "empty query".to_string(),
            });
        }

        let html = retry_async(&self.retry, "google search", SearchError::is_transient, || {
            self.fetch_result_page(query, num_results)
        })
        .await?;

        Ok(extract_result_links(&html, ENGINE_MARKER, num_results, |href| {
            Some(href.to_string())
        }))
    }

    fn name(&self) -> &'static str {
        "google"
    }

    fn priority(&self) -> u8 {
        10
    }
}

pub(crate) fn map_transport_error(e: reqwest::Error, timeout_ms: u64) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout { timeout_ms }
    } else {
        SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        }
    }
}
