// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the answer orchestrator and conversation memory

use chrono::FixedOffset;
use std::env;

pub const DEFAULT_APOLOGY: &str = "🔍 Произошла ошибка при генерации или проверке информации.";

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Appended to every fact-check query (default: "Беларусь")
    pub locale_hint: String,
    /// Users' region in the system prompt, "для пользователей в {region}" (default: "Беларуси")
    pub region: String,
    /// Clock label in "Текущее время в {tz_label}" (default: "Беларуси")
    pub tz_label: String,
    /// Offset of the assistant's wall clock from UTC (default: 10800, UTC+3)
    pub tz_offset_secs: i32,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Users kept in conversation memory (default: 10000)
    pub memory_capacity: usize,
    /// Idle time after which a user's memory is forgotten (default: 86400)
    pub memory_ttl_secs: u64,
    /// Utterances remembered per user (default: 10)
    pub history_len: usize,
    /// Returned verbatim when answering fails
    pub apology: String,
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            locale_hint: env::var("ASSISTANT_LOCALE_HINT").unwrap_or(defaults.locale_hint),
            region: env::var("ASSISTANT_REGION").unwrap_or(defaults.region),
            tz_label: env::var("ASSISTANT_TZ_LABEL").unwrap_or(defaults.tz_label),
            tz_offset_secs: env::var("ASSISTANT_TZ_OFFSET_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tz_offset_secs),
            max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: env::var("GENERATION_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            memory_capacity: env::var("MEMORY_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.memory_capacity),
            memory_ttl_secs: env::var("MEMORY_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.memory_ttl_secs),
            history_len: env::var("MEMORY_HISTORY_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.history_len),
            apology: defaults.apology,
        }
    }

    /// Fixed offset for the time shortcut
    pub fn tz_offset(&self) -> Result<FixedOffset, String> {
        FixedOffset::east_opt(self.tz_offset_secs)
            .ok_or_else(|| format!("Invalid timezone offset: {}s", self.tz_offset_secs))
    }

    pub fn validate(&self) -> Result<(), String> {
        self.tz_offset()?;
        if self.max_tokens == 0 {
            return Err("max_tokens must be at least 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature out of range: {}", self.temperature));
        }
        if self.memory_capacity == 0 {
            return Err("memory_capacity must be at least 1".to_string());
        }
        if self.memory_ttl_secs == 0 {
            return Err("Memory TTL must be greater than 0".to_string());
        }
        if self.history_len == 0 {
            return Err("history_len must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            locale_hint: "Беларусь".to_string(),
            region: "Беларуси".to_string(),
            tz_label: "Беларуси".to_string(),
            tz_offset_secs: 3 * 3600,
            max_tokens: 1024,
            temperature: 0.1,
            memory_capacity: 10_000,
            memory_ttl_secs: 86_400,
            history_len: 10,
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }
}
