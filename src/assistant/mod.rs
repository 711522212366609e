// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversational answering on top of retrieval
//!
//! The orchestrator glues conversation memory, the time shortcut, context
//! injection, the generation backend and fact verification together.

pub mod clock;
pub mod config;
pub mod memory;
pub mod orchestrator;

use thiserror::Error;

use crate::inference::GenerationError;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("no user message to answer")]
    EmptyConversation,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("invalid assistant configuration: {0}")]
    Config(String),
}

pub use clock::LocalClock;
pub use config::{AssistantConfig, DEFAULT_APOLOGY};
pub use memory::{ConversationMemory, MemorySnapshot};
pub use orchestrator::{system_prompt, AnswerOutcome, Assistant};
