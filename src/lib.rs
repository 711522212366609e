// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod inference;
pub mod rag;
pub mod search;
pub mod services;
pub mod utils;
pub mod version;

// Re-export main types
pub use assistant::{AnswerOutcome, Assistant, AssistantConfig};
pub use config::{AppConfig, ConfigError, Lexicon};
pub use inference::{Ai21Client, ChatMessage, GenerationBackend, Role};
pub use rag::{ContextBuilder, ContextSource, FactVerification, FactVerifier, RetrievalCache};
pub use search::{ContentFetcher, SearchResult, SearchService};
pub use services::Services;
