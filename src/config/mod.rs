// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Application configuration
//!
//! Each component owns its config struct (`Default`, `from_env`, `validate`);
//! `AppConfig` composes them after `dotenv` has loaded any `.env` file.

pub mod lexicon;

use std::env;
use thiserror::Error;

use crate::assistant::AssistantConfig;
use crate::inference::GenerationConfig;
use crate::rag::RetrievalConfig;
use crate::search::content::ContentFetchConfig;
use crate::search::SearchConfig;

pub use lexicon::Lexicon;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid entity pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Complete configuration for the service
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub content: ContentFetchConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
    pub assistant: AssistantConfig,
    pub lexicon: Lexicon,
}

impl AppConfig {
    /// Load `.env` (if present) and read every section from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let config = Self {
            server: ServerConfig::from_env(),
            search: SearchConfig::from_env(),
            content: ContentFetchConfig::from_env(),
            retrieval: RetrievalConfig::from_env(),
            generation: GenerationConfig::from_env(),
            assistant: AssistantConfig::from_env(),
            lexicon: Lexicon::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate().map_err(ConfigError::Invalid)?;
        self.content.validate().map_err(ConfigError::Invalid)?;
        self.retrieval.validate().map_err(ConfigError::Invalid)?;
        self.generation.validate().map_err(ConfigError::Invalid)?;
        self.assistant.validate().map_err(ConfigError::Invalid)?;
        self.lexicon.validate()?;
        Ok(())
    }
}
