// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Text generation backends
pub mod ai21;
pub mod backend;
pub mod config;
pub mod types;

// Re-export main types for convenience
pub use ai21::Ai21Client;
pub use backend::{GenerationBackend, GenerationError};
pub use config::GenerationConfig;
pub use types::{ChatMessage, Role};
