// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Post-hoc fact verification
//!
//! Numbers and date literals in a generated answer are re-queried through
//! retrieval. A token whose context carries the not-found marker is
//! unconfirmed. The result is advisory; callers decide whether to show it.

use futures::future::join_all;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::format::NOT_FOUND_MARKER;
use super::ContextSource;

/// Dates first so "15.03.2024" is not split into three numbers
const FACT_PATTERN: &str = r"\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d+";

const MAX_NUMBER_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Confirmed,
    Unconfirmed,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Confirmed => "✅ подтверждено",
            Verdict::Unconfirmed => "⚠️ не подтверждено",
        }
    }

    /// Verdict for a retrieval context; the marker matches in any case
    pub fn from_context(context: &str) -> Self {
        if context.trim().is_empty() || context.to_lowercase().contains(NOT_FOUND_MARKER) {
            Verdict::Unconfirmed
        } else {
            Verdict::Confirmed
        }
    }
}

/// Token → verdict for one generated answer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FactVerification {
    pub verdicts: BTreeMap<String, Verdict>,
}

impl FactVerification {
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn confirmed(&self) -> usize {
        self.verdicts
            .values()
            .filter(|v| **v == Verdict::Confirmed)
            .count()
    }

    pub fn unconfirmed(&self) -> usize {
        self.verdicts.len() - self.confirmed()
    }

    /// Append a verdict footnote to `answer`; unchanged when nothing was checked
    pub fn annotate(&self, answer: &str) -> String {
        if self.verdicts.is_empty() {
            return answer.to_string();
        }
        let lines: Vec<String> = self
            .verdicts
            .iter()
            .map(|(token, verdict)| format!("• {}: {}", token, verdict.label()))
            .collect();
        format!("{}\n\nПроверка фактов:\n{}", answer, lines.join("\n"))
    }
}

pub struct FactVerifier {
    source: Arc<dyn ContextSource>,
    pattern: Regex,
}

impl FactVerifier {
    pub fn new(source: Arc<dyn ContextSource>) -> Self {
        Self {
            source,
            pattern: Regex::new(FACT_PATTERN).unwrap(),
        }
    }

    /// Distinct number/date tokens in first-occurrence order
    pub fn extract_tokens(&self, answer: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for m in self.pattern.find_iter(answer) {
            let token = m.as_str();
            let is_bare_number = token.bytes().all(|b| b.is_ascii_digit());
            if is_bare_number && token.len() > MAX_NUMBER_DIGITS {
                continue;
            }
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        tokens
    }

    /// Re-query every token with `locale_hint` and collect verdicts
    pub async fn verify(&self, answer: &str, locale_hint: &str) -> FactVerification {
        let tokens = self.extract_tokens(answer);
        if tokens.is_empty() {
            return FactVerification::default();
        }
        debug!("Verifying {} tokens: {:?}", tokens.len(), tokens);

        let checks = tokens.iter().map(|token| async move {
            let query = format!("{} {}", token, locale_hint).trim().to_string();
            let context = self.source.get_relevant_context(&query).await;
            (token.clone(), Verdict::from_context(&context))
        });

        let verification = FactVerification {
            verdicts: join_all(checks).await.into_iter().collect(),
        };
        info!(
            "Fact check: {} confirmed, {} unconfirmed",
            verification.confirmed(),
            verification.unconfirmed()
        );
        verification
    }
}
