// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query rewriting for freshness-biased search
//!
//! Drops stop words and short tokens, then appends a freshness qualifier
//! and the current year so engines favour recent pages.

use chrono::{Datelike, Local};

use crate::config::Lexicon;

/// Rewrites user queries into engine queries
#[derive(Debug, Clone)]
pub struct QueryRewriter {
    lexicon: Lexicon,
}

impl QueryRewriter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Rewrite using the current calendar year
    pub fn rewrite(&self, query: &str) -> String {
        self.rewrite_for_year(query, Local::now().year())
    }

    pub fn rewrite_for_year(&self, query: &str, year: i32) -> String {
        let lowered = query.to_lowercase();
        let kept: Vec<&str> = lowered
            .split_whitespace()
            .filter(|w| w.chars().count() >= self.lexicon.min_token_len)
            .filter(|w| !self.lexicon.is_stop_word(w))
            .collect();

        if kept.is_empty() {
            format!("{} {} {}", query.trim(), self.lexicon.fallback_suffix, year)
                .trim_start()
                .to_string()
        } else {
            format!("{} {} {}", kept.join(" "), self.lexicon.freshness_suffix, year)
        }
    }
}

impl Default for QueryRewriter {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}
