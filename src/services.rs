// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Component wiring
//!
//! ```text
//! SearchService ─► ContextBuilder ◄─ ContentFetcher
//!                        │
//!                  RetrievalCache ─► Assistant ◄─ Ai21Client
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::api::AppState;
use crate::assistant::Assistant;
use crate::config::AppConfig;
use crate::inference::{Ai21Client, GenerationBackend};
use crate::rag::{ContextBuilder, RetrievalCache};
use crate::search::{ContentFetcher, QueryRewriter, SearchService};

/// Fully wired pipeline
#[derive(Clone)]
pub struct Services {
    pub builder: Arc<ContextBuilder>,
    pub retrieval: Arc<RetrievalCache>,
    pub assistant: Arc<Assistant>,
}

impl Services {
    /// Wire everything with the AI21 client as generation backend
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend =
            Ai21Client::new(&config.generation).context("failed to build generation client")?;
        Self::with_backend(config, Arc::new(backend))
    }

    /// Wire everything around an existing generation backend
    pub fn with_backend(config: &AppConfig, backend: Arc<dyn GenerationBackend>) -> Result<Self> {
        let rewriter = QueryRewriter::new(config.lexicon.clone());
        let search = SearchService::new(&config.search, rewriter)
            .context("failed to build search providers")?;
        info!("Search providers: {:?}", search.provider_names());

        let fetcher =
            ContentFetcher::new(config.content.clone()).context("failed to build content fetcher")?;

        let builder = Arc::new(ContextBuilder::new(
            Arc::new(search),
            Arc::new(fetcher),
            &config.retrieval,
        ));
        let retrieval = Arc::new(RetrievalCache::from_config(
            builder.clone(),
            &config.retrieval,
        ));
        let assistant = Assistant::new(
            backend,
            retrieval.clone(),
            &config.lexicon,
            config.assistant.clone(),
        )
        .context("failed to build assistant")?;

        Ok(Self {
            builder,
            retrieval,
            assistant: Arc::new(assistant),
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            assistant: self.assistant.clone(),
            retrieval: self.retrieval.clone(),
        }
    }
}
