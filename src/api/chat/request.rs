// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat API request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for POST /api/chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatApiRequest {
    /// Caller's user identifier; string or number
    #[serde(default)]
    pub user_id: Option<Value>,

    /// User utterance (required)
    #[serde(default)]
    pub text: Option<String>,

    /// Echoed back unchanged
    #[serde(default)]
    pub request_id: Option<Value>,

    /// Append fact-check verdicts to the answer
    #[serde(default)]
    pub annotate: bool,
}

impl ChatApiRequest {
    /// Non-blank utterance, if present
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Memory key for the caller; numbers are stringified
    pub fn user_key(&self) -> Option<String> {
        match self.user_id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
