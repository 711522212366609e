// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context builder
//!
//! Search → concurrent extraction fan-out → filter → bounded context.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::config::RetrievalConfig;
use super::format::ContextFormat;
use super::ContextSource;
use crate::search::{PageExtractor, SearchResult, UrlResolver};

/// Outcome of one extraction fan-out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FanOutReport {
    /// URLs returned by search
    pub attempted: usize,
    /// Extractions that produced text
    pub succeeded: usize,
    /// (url, reason) for every extraction that produced nothing
    pub failed: Vec<(String, String)>,
}

/// Builds bounded contexts from live search results
pub struct ContextBuilder {
    resolver: Arc<dyn UrlResolver>,
    extractor: Arc<dyn PageExtractor>,
    format: ContextFormat,
    max_sources: usize,
    task_timeout: Duration,
}

impl ContextBuilder {
    pub fn new(
        resolver: Arc<dyn UrlResolver>,
        extractor: Arc<dyn PageExtractor>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            resolver,
            extractor,
            format: ContextFormat::from_config(config),
            max_sources: config.max_sources,
            task_timeout: Duration::from_secs(config.task_timeout_secs),
        }
    }

    /// Resolve candidates and extract them concurrently
    ///
    /// Each extraction runs under its own timeout; a failed or empty page is
    /// recorded in the report and left out of the results without affecting
    /// its siblings. Results keep search order.
    pub async fn gather(&self, query: &str) -> (Vec<SearchResult>, FanOutReport) {
        let urls = self.resolver.resolve(query, self.max_sources).await;
        let mut report = FanOutReport {
            attempted: urls.len(),
            ..FanOutReport::default()
        };

        let tasks = urls.iter().map(|url| async move {
            let outcome = match timeout(self.task_timeout, self.extractor.try_extract(url)).await {
                Ok(Ok(text)) if !text.trim().is_empty() => Ok(text),
                Ok(Ok(_)) => Err("empty content".to_string()),
                Ok(Err(e)) => Err(e.to_string()),
                Err(_) => Err(format!(
                    "timed out after {}s",
                    self.task_timeout.as_secs()
                )),
            };
            (url.clone(), outcome)
        });

        let mut results = Vec::new();
        for (url, outcome) in join_all(tasks).await {
            match outcome {
                Ok(text) => {
                    report.succeeded += 1;
                    results.push(SearchResult::new(url, Some(text)));
                }
                Err(reason) => {
                    warn!("Skipping {}: {}", url, reason);
                    report.failed.push((url, reason));
                }
            }
        }

        (results, report)
    }

    /// Build the context and report how the fan-out went
    pub async fn build_with_report(&self, query: &str) -> (String, FanOutReport) {
        let start = Instant::now();
        let (results, report) = self.gather(query).await;
        let context = self.format.render(&results, query);

        info!(
            "Context for '{}': {}/{} pages extracted, {} chars in {}ms",
            query,
            report.succeeded,
            report.attempted,
            context.chars().count(),
            start.elapsed().as_millis()
        );
        debug!("Fan-out failures: {:?}", report.failed);

        (context, report)
    }

    /// Build the context for `query`; never fails
    pub async fn build(&self, query: &str) -> String {
        self.build_with_report(query).await.0
    }
}

#[async_trait]
impl ContextSource for ContextBuilder {
    async fn get_relevant_context(&self, query: &str) -> String {
        self.build(query).await
    }
}
