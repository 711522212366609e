// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation backend abstraction

use async_trait::async_trait;
use thiserror::Error;

use super::types::ChatMessage;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation request timed out")]
    Timeout,

    #[error("generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed generation response: {0}")]
    InvalidResponse(String),

    #[error("generation returned no content")]
    EmptyCompletion,
}

impl GenerationError {
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Transport(_) | GenerationError::Timeout => true,
            GenerationError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Chat-completion style text generation
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError>;

    fn model_name(&self) -> &str;
}
