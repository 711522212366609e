// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Locale-specific word lists and patterns
//!
//! Stop words, query qualifiers, the entity rule and the time-query
//! triggers live here as data so another locale can ship its own TOML file.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use super::ConfigError;

/// Locale data used by query rewriting, memory and the time shortcut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Function words dropped from search queries (compared lowercased)
    pub stop_words: Vec<String>,
    /// Tokens shorter than this many characters are dropped
    pub min_token_len: usize,
    /// Appended to a rewritten query to bias results toward recency
    pub freshness_suffix: String,
    /// Appended to the original query when rewriting leaves nothing
    pub fallback_suffix: String,
    /// Regex whose last match in an utterance is remembered as the entity
    pub entity_pattern: String,
    /// Substrings (lowercase) that mark a "what time is it" question
    pub time_triggers: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stop_words: ["как", "что", "где", "когда", "почему", "зачем", "мне", "ты", "вы", "свой"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            min_token_len: 3,
            freshness_suffix: "актуальная информация".to_string(),
            fallback_suffix: "информация".to_string(),
            entity_pattern: r"\b[А-ЯЁ][а-яё]+\b".to_string(),
            time_triggers: ["который час", "сколько сейчас", "время"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl Lexicon {
    /// Parse a lexicon from TOML; absent keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let lexicon: Lexicon = toml::from_str(raw)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load from `LEXICON_PATH` when set, otherwise use the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("LEXICON_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_token_len == 0 {
            return Err(ConfigError::Invalid(
                "min_token_len must be at least 1".to_string(),
            ));
        }
        self.entity_regex()?;
        Ok(())
    }

    /// Compile the entity rule
    pub fn entity_regex(&self) -> Result<Regex, ConfigError> {
        Ok(Regex::new(&self.entity_pattern)?)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.stop_words.iter().any(|w| w.to_lowercase() == lower)
    }
}
