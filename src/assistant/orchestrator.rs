// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer orchestration
//!
//! ```text
//! conversation ─┬─► memory prompt ─────────┐
//!               ├─► retrieval (cached) ────┼─► backend ─► fact check ─► AnswerOutcome
//!               └─► time shortcut ─────────┘
//! ```

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::clock::LocalClock;
use super::config::AssistantConfig;
use super::memory::{ConversationMemory, MemorySnapshot};
use super::AssistantError;
use crate::config::Lexicon;
use crate::inference::{ChatMessage, GenerationBackend, Role};
use crate::rag::{ContextSource, FactVerification, FactVerifier};

/// Result of one answered turn
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    /// Display-ready text (the apology when `degraded`)
    pub answer: String,
    pub verification: FactVerification,
    /// True when generation failed and `answer` is the fixed apology
    pub degraded: bool,
}

/// Builds the memory-aware system instruction
pub fn system_prompt(region: &str, memory: Option<&MemorySnapshot>) -> String {
    let history = match memory {
        Some(m) if !m.recent.is_empty() => m.recent.join(" | "),
        _ => "нет истории".to_string(),
    };
    let mut prompt = format!(
        "Ты интеллектуальный ассистент для пользователей в {}.\n\
         Отвечай с учётом местных реалий и актуальной информации.\n\
         Используй только проверенные данные из интернета.\n\
         Память пользователя (последние сообщения): {}",
        region, history
    );
    if let Some(entity) = memory.and_then(|m| m.entity.as_deref()) {
        prompt.push_str(&format!(
            "\nИспользуй последнюю сущность из памяти пользователя: {}",
            entity
        ));
    }
    prompt
}

fn context_message(context: &str) -> ChatMessage {
    ChatMessage::system(format!("Актуальная информация из интернета:\n{}", context))
}

pub struct Assistant {
    backend: Arc<dyn GenerationBackend>,
    retrieval: Arc<dyn ContextSource>,
    verifier: FactVerifier,
    memory: ConversationMemory,
    clock: LocalClock,
    time_triggers: Vec<String>,
    config: AssistantConfig,
}

impl Assistant {
    /// `retrieval` serves both context injection and fact checks
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        retrieval: Arc<dyn ContextSource>,
        lexicon: &Lexicon,
        config: AssistantConfig,
    ) -> Result<Self, AssistantError> {
        config.validate().map_err(AssistantError::Config)?;
        let offset = config.tz_offset().map_err(AssistantError::Config)?;
        let entity_pattern = lexicon
            .entity_regex()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        let memory = ConversationMemory::new(
            config.memory_capacity,
            Duration::from_secs(config.memory_ttl_secs),
            config.history_len,
            entity_pattern,
        );

        Ok(Self {
            backend,
            verifier: FactVerifier::new(retrieval.clone()),
            retrieval,
            memory,
            clock: LocalClock::new(offset, config.tz_label.clone()),
            time_triggers: lexicon.time_triggers.clone(),
            config,
        })
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Answer the latest user message; never fails
    pub async fn answer(&self, conversation: &[ChatMessage], user_id: Option<&str>) -> AnswerOutcome {
        match self.try_answer(conversation, user_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Answer failed for user {:?}: {}", user_id, e);
                AnswerOutcome {
                    answer: self.config.apology.clone(),
                    verification: FactVerification::default(),
                    degraded: true,
                }
            }
        }
    }

    pub async fn answer_text(&self, conversation: &[ChatMessage], user_id: Option<&str>) -> String {
        self.answer(conversation, user_id).await.answer
    }

    /// Single-utterance convenience used by the HTTP and CLI surfaces
    pub async fn ask(&self, text: &str, user_id: Option<&str>) -> AnswerOutcome {
        self.answer(&[ChatMessage::user(text)], user_id).await
    }

    async fn try_answer(
        &self,
        conversation: &[ChatMessage],
        user_id: Option<&str>,
    ) -> Result<AnswerOutcome, AssistantError> {
        let start = Instant::now();
        let utterance = conversation
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .filter(|text| !text.trim().is_empty())
            .ok_or(AssistantError::EmptyConversation)?;

        let snapshot = match user_id {
            Some(id) => self.memory.snapshot(id).await,
            None => None,
        };

        let context = self.retrieval.get_relevant_context(utterance).await;

        let mut messages = Vec::with_capacity(conversation.len() + 3);
        messages.push(ChatMessage::system(system_prompt(
            &self.config.region,
            snapshot.as_ref(),
        )));
        messages.push(context_message(&context));
        messages.extend_from_slice(conversation);
        if LocalClock::is_time_question(utterance, &self.time_triggers) {
            debug!("Time question detected");
            messages.push(ChatMessage::system(self.clock.time_fact()));
        }

        let answer = self
            .backend
            .complete(&messages, self.config.max_tokens, self.config.temperature)
            .await?;

        let verification = self.verifier.verify(&answer, &self.config.locale_hint).await;

        if let Some(id) = user_id {
            self.memory.record(id, utterance).await;
        }

        info!(
            "Answered user {:?} with {} ({} facts checked) in {}ms",
            user_id,
            self.backend.model_name(),
            verification.verdicts.len(),
            start.elapsed().as_millis()
        );

        Ok(AnswerOutcome {
            answer,
            verification,
            degraded: false,
        })
    }
}
