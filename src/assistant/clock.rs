// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wall clock for "what time is it" questions

use chrono::{DateTime, FixedOffset, Utc};

pub struct LocalClock {
    offset: FixedOffset,
    label: String,
}

impl LocalClock {
    pub fn new(offset: FixedOffset, label: impl Into<String>) -> Self {
        Self {
            offset,
            label: label.into(),
        }
    }

    /// Whether `utterance` contains any of the (lowercase) triggers
    pub fn is_time_question(utterance: &str, triggers: &[String]) -> bool {
        let lower = utterance.to_lowercase();
        triggers
            .iter()
            .any(|t| !t.is_empty() && lower.contains(&t.to_lowercase()))
    }

    /// System fact with the current local time, `HH:MM:SS`
    pub fn time_fact(&self) -> String {
        self.time_fact_at(Utc::now())
    }

    pub fn time_fact_at(&self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&self.offset);
        format!("Текущее время в {}: {}", self.label, local.format("%H:%M:%S"))
    }
}
