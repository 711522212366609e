// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP content fetching with timeouts
//!
//! Fetches candidate pages and reduces them to bounded visible text.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::{Host, Url};

use super::config::ContentFetchConfig;
use super::extractor::extract_visible_text;
use crate::utils::{retry_async, RetryPolicy};

/// Content fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),

    #[error("Non-text response ({content_type}) from: {url}")]
    NonText { url: String, content_type: String },

    #[error("No content extracted from: {0}")]
    NoContent(String),

    /// URL is unsafe (bad scheme, localhost, private IP)
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),

    /// Redirect chain refused (unsafe hop or too many hops)
    #[error("Redirect refused for {url}: {reason}")]
    Redirect { url: String, reason: String },
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout(_) | FetchError::HttpError(_) => true,
            FetchError::HttpStatus(code, _) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// Turns a URL into bounded plain text
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetch and extract, reporting why a page produced nothing
    async fn try_extract(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch and extract; any failure yields empty text
    async fn extract(&self, url: &str) -> String {
        match self.try_extract(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Extraction failed for {}: {}", url, e);
                String::new()
            }
        }
    }
}

/// Content fetcher backed by reqwest
pub struct ContentFetcher {
    client: Client,
    config: ContentFetchConfig,
}

impl ContentFetcher {
    /// Create a new content fetcher
    pub fn new(config: ContentFetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .redirect(redirect_policy(
                config.max_redirects,
                config.allow_private_hosts,
            ))
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Check if URL is safe to fetch (http(s), not localhost/private IP)
    pub fn is_safe_url(url: &str, allow_private: bool) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }
        if allow_private {
            return parsed.host().is_some();
        }

        match parsed.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.to_lowercase();
                domain != "localhost" && !domain.ends_with(".localhost")
            }
            Some(Host::Ipv4(ip)) => is_public_ip(IpAddr::V4(ip)),
            Some(Host::Ipv6(ip)) => is_public_ip(IpAddr::V6(ip)),
            None => false,
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else if e.is_redirect() {
                FetchError::Redirect {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(FetchError::NonText {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })
    }
}

#[async_trait]
impl PageExtractor for ContentFetcher {
    async fn try_extract(&self, url: &str) -> Result<String, FetchError> {
        if !Self::is_safe_url(url, self.config.allow_private_hosts) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching content from: {}", url);
        let retry: &RetryPolicy = &self.config.retry;
        let html = retry_async(retry, "page fetch", FetchError::is_transient, || {
            self.fetch_once(url)
        })
        .await?;

        let text = extract_visible_text(&html, self.config.max_chars);
        if text.is_empty() {
            return Err(FetchError::NoContent(url.to_string()));
        }

        info!("Fetched {} chars from: {}", text.chars().count(), url);
        Ok(text)
    }
}

/// Every redirect hop must pass the same URL check as the first request
fn redirect_policy(max_redirects: usize, allow_private: bool) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= max_redirects {
            attempt.error("too many redirects")
        } else if !ContentFetcher::is_safe_url(attempt.url().as_str(), allow_private) {
            let target = attempt.url().to_string();
            warn!("Blocked redirect to {}", target);
            attempt.error(format!("unsafe redirect target {}", target))
        } else {
            attempt.follow()
        }
    })
}

fn is_textual(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    lower.starts_with("text/") || lower.contains("html") || lower.contains("xml")
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast())
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            let unique_local = (segments[0] & 0xfe00) == 0xfc00;
            let link_local = (segments[0] & 0xffc0) == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        }
    }
}
