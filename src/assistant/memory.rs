// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Short-term conversation memory
//!
//! Per user: the last few utterances and the most recently mentioned
//! entity. Bounded by an LRU capacity over users and an idle TTL.

use lru::LruCache;
use regex::Regex;
use serde::Serialize;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct UserMemory {
    recent: VecDeque<String>,
    entity: Option<String>,
    touched_at: Instant,
}

/// Read-only view of one user's memory
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemorySnapshot {
    /// Oldest first
    pub recent: Vec<String>,
    pub entity: Option<String>,
}

pub struct ConversationMemory {
    users: Mutex<LruCache<String, UserMemory>>,
    ttl: Duration,
    history_len: usize,
    entity_pattern: Regex,
}

impl ConversationMemory {
    pub fn new(capacity: usize, ttl: Duration, history_len: usize, entity_pattern: Regex) -> Self {
        let bound = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            users: Mutex::new(LruCache::new(bound)),
            ttl,
            history_len: history_len.max(1),
            entity_pattern,
        }
    }

    /// Last match of the entity pattern in `utterance`
    pub fn extract_entity(&self, utterance: &str) -> Option<String> {
        self.entity_pattern
            .find_iter(utterance)
            .last()
            .map(|m| m.as_str().to_string())
    }

    /// Memory for `user_id`; `None` for unknown or expired users
    pub async fn snapshot(&self, user_id: &str) -> Option<MemorySnapshot> {
        let mut users = self.users.lock().await;
        let expired = match users.get(user_id) {
            Some(memory) if memory.touched_at.elapsed() <= self.ttl => {
                return Some(MemorySnapshot {
                    recent: memory.recent.iter().cloned().collect(),
                    entity: memory.entity.clone(),
                });
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            debug!("Conversation memory for {} expired", user_id);
            users.pop(user_id);
        }
        None
    }

    /// Append `utterance` to the user's history and refresh the entity
    pub async fn record(&self, user_id: &str, utterance: &str) {
        let entity = self.extract_entity(utterance);
        let mut users = self.users.lock().await;

        let stale = users
            .peek(user_id)
            .map_or(false, |m| m.touched_at.elapsed() > self.ttl);
        if stale {
            users.pop(user_id);
        }

        if !users.contains(user_id) {
            users.put(
                user_id.to_string(),
                UserMemory {
                    recent: VecDeque::with_capacity(self.history_len),
                    entity: None,
                    touched_at: Instant::now(),
                },
            );
        }
        let Some(memory) = users.get_mut(user_id) else {
            return;
        };
        memory.recent.push_back(utterance.to_string());
        while memory.recent.len() > self.history_len {
            memory.recent.pop_front();
        }
        if entity.is_some() {
            memory.entity = entity;
        }
        memory.touched_at = Instant::now();
    }

    /// Number of users currently remembered
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn clear(&self) {
        self.users.lock().await.clear();
    }
}
