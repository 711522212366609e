// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AI21 Studio client via the OpenAI-compatible chat completions API

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::backend::{GenerationBackend, GenerationError};
use super::config::GenerationConfig;
use super::types::ChatMessage;
use crate::utils::{retry_async, RetryPolicy};

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the AI21 chat completions endpoint
pub struct Ai21Client {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model_name: String,
    retry: RetryPolicy,
}

impl Ai21Client {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        if config.api_key.is_none() {
            warn!("AI21_API_KEY is not set; generation requests are unauthenticated");
        }
        info!(
            "Generation client configured: endpoint={}, model={}",
            endpoint, config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model_name: config.model.clone(),
            retry: config.retry.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request_once(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model_name,
            messages,
            max_tokens,
            temperature,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyCompletion)
    }
}

#[async_trait]
impl GenerationBackend for Ai21Client {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let start = Instant::now();
        debug!("Sending {} messages to {}", messages.len(), self.model_name);

        let text = retry_async(&self.retry, "generation", GenerationError::is_transient, || {
            self.request_once(messages, max_tokens, temperature)
        })
        .await?;

        info!(
            "Generated {} chars with {} in {}ms",
            text.chars().count(),
            self.model_name,
            start.elapsed().as_millis()
        );
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
