// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements web search using DuckDuckGo's HTML interface.
//! No API key required, serves as a fallback provider.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::config::SearchConfig;
use super::google::map_transport_error;
use super::provider::SearchProvider;
use super::result_page::extract_result_links;
use super::types::SearchError;
use crate::utils::{retry_async, RetryPolicy};

const ENGINE_MARKER: &str = "duckduckgo";

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl DuckDuckGoProvider {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SearchError::ProviderUnavailable {
                provider: format!("duckduckgo ({})", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.duckduckgo_url.clone(),
            timeout_ms: config.request_timeout_secs * 1000,
            retry: config.retry.clone(),
        })
    }

    async fn fetch_result_page(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_ms))?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "empty query".to_string(),
            });
        }

        let html = retry_async(&self.retry, "duckduckgo search", SearchError::is_transient, || {
            self.fetch_result_page(query)
        })
        .await?;

        Ok(extract_result_links(
            &html,
            ENGINE_MARKER,
            num_results,
            extract_ddg_url,
        ))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn priority(&self) -> u8 {
        50 // Fallback provider
    }
}

/// Extract the target URL from DuckDuckGo's redirect link
///
/// Redirects look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=..`;
/// direct absolute links pass through unchanged.
fn extract_ddg_url(href: &str) -> Option<String> {
    if href.contains("uddg=") {
        let absolute = if href.starts_with("//") {
            format!("https:{}", href)
        } else if href.starts_with('/') {
            format!("https://duckduckgo.com{}", href)
        } else {
            href.to_string()
        };
        let parsed = Url::parse(&absolute).ok()?;
        return parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned());
    }
    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddg_provider_creation() {
        let provider = DuckDuckGoProvider::new(&SearchConfig::default()).unwrap();
        assert_eq!(provider.name(), "duckduckgo");
        assert_eq!(provider.priority(), 50);
    }

    #[test]
    fn test_extract_ddg_url() {
        let redirect = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1&rut=abc";
        assert_eq!(
            extract_ddg_url(redirect),
            Some("https://example.com/a?b=1".to_string())
        );

        let direct = "https://example.com";
        assert_eq!(extract_ddg_url(direct), Some("https://example.com".to_string()));

        assert_eq!(extract_ddg_url("/html/?q=next"), None);
    }

    #[test]
    fn test_parse_result_page() {
        let html = r#"
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fbelta.by%2Fnews&rut=1">BelTA</a>
            <a class="result__a" href="https://duckduckgo.com/settings">Settings</a>
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fnews.tut.by%2F&rut=2">TUT</a>
        "#;
        let links = extract_result_links(html, ENGINE_MARKER, 5, extract_ddg_url);
        assert_eq!(links, vec!["https://belta.by/news", "https://news.tut.by/"]);
    }

    #[test]
    fn test_parse_empty_html() {
        let links = extract_result_links("", ENGINE_MARKER, 10, extract_ddg_url);
        assert!(links.is_empty());
    }
}
