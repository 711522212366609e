// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat API response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::rag::{FactVerification, Verdict};

/// Response body for POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatApiResponse {
    pub success: bool,
    pub answer: String,
    pub request_id: Option<Value>,
    /// Token → "confirmed" | "unconfirmed"
    pub verification: BTreeMap<String, String>,
    pub degraded: bool,
}

impl ChatApiResponse {
    pub fn new(
        answer: String,
        request_id: Option<Value>,
        verification: &FactVerification,
        degraded: bool,
    ) -> Self {
        let verification = verification
            .verdicts
            .iter()
            .map(|(token, verdict)| {
                let label = match verdict {
                    Verdict::Confirmed => "confirmed",
                    Verdict::Unconfirmed => "unconfirmed",
                };
                (token.clone(), label.to_string())
            })
            .collect();

        Self {
            success: true,
            answer,
            request_id,
            verification,
            degraded,
        }
    }
}
