// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Assistant over the real AI21 client, search and fetch clients

use super::mock::{FakeWeb, UNKNOWN_MARKER};
use fresh_rag::assistant::DEFAULT_APOLOGY;
use fresh_rag::rag::Verdict;
use fresh_rag::Services;
use regex::Regex;
use serde_json::Value;
use std::sync::atomic::Ordering;

fn messages(request: &Value) -> Vec<(String, String)> {
    request["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["role"].as_str().unwrap().to_string(),
                m["content"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_time_question_reaches_backend_with_clock_fact() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    let outcome = services.assistant.ask("сколько сейчас времени", Some("1")).await;
    assert!(!outcome.degraded);
    assert_eq!(outcome.answer, "Ответ без чисел.");

    let request = web.state.last_chat_request().unwrap();
    assert_eq!(request["model"], "jamba-large");
    assert_eq!(request["max_tokens"], 1024);

    let time_pattern = Regex::new(r"^Текущее время в Беларуси: \d{2}:\d{2}:\d{2}$").unwrap();
    let sent = messages(&request);
    assert!(sent
        .iter()
        .any(|(role, content)| role == "system" && time_pattern.is_match(content)));

    let auth = web.state.chat_auth.lock().unwrap().clone();
    assert_eq!(auth, vec!["Bearer test-key"]);
}

#[tokio::test]
async fn test_context_injected_as_system_message() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    services.assistant.ask("курс доллара", None).await;

    let sent = messages(&web.state.last_chat_request().unwrap());
    assert_eq!(sent[0].0, "system");
    assert!(sent[0].1.contains("нет истории"));
    assert_eq!(sent[1].0, "system");
    assert!(sent[1].1.contains("Всего источников: 3"));
    assert_eq!(sent[2], ("user".to_string(), "курс доллара".to_string()));
}

#[tokio::test]
async fn test_fact_check_issues_one_retrieval_per_token() {
    let web = FakeWeb::start().await;
    web.state
        .set_reply(&format!("В 2024 году, как и в {}, курс вырос.", UNKNOWN_MARKER));
    let services = Services::from_config(&web.app_config()).unwrap();

    let outcome = services.assistant.ask("курс доллара", None).await;

    // context injection plus one search per distinct token
    assert_eq!(web.state.google_hits(), 3);
    assert_eq!(outcome.verification.verdicts.len(), 2);
    assert_eq!(outcome.verification.verdicts["2024"], Verdict::Confirmed);
    assert_eq!(
        outcome.verification.verdicts[UNKNOWN_MARKER],
        Verdict::Unconfirmed
    );
    assert!(!outcome.answer.contains("подтверждено"));
}

#[tokio::test]
async fn test_memory_carries_between_turns() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    services.assistant.ask("Что нового в Бресте", Some("u-7")).await;
    services.assistant.ask("а погода?", Some("u-7")).await;

    let sent = messages(&web.state.last_chat_request().unwrap());
    assert!(sent[0].1.contains("Что нового в Бресте"));
    assert!(sent[0].1.contains("Бресте"));
    assert!(!sent[0].1.contains("а погода?"));
}

#[tokio::test]
async fn test_backend_error_returns_apology() {
    let web = FakeWeb::start().await;
    web.state.chat_status.store(503, Ordering::SeqCst);
    let services = Services::from_config(&web.app_config()).unwrap();

    let outcome = services.assistant.ask("вопрос", Some("u-8")).await;
    assert!(outcome.degraded);
    assert_eq!(outcome.answer, DEFAULT_APOLOGY);
    assert!(services.assistant.memory().snapshot("u-8").await.is_none());
}

#[tokio::test]
async fn test_transient_backend_error_retried_when_configured() {
    let web = FakeWeb::start().await;
    web.state.chat_status.store(429, Ordering::SeqCst);
    let mut config = web.app_config();
    config.generation.retry.max_retries = 2;
    config.generation.retry.initial_delay_ms = 1;
    config.generation.retry.max_delay_ms = 5;
    let services = Services::from_config(&config).unwrap();

    let outcome = services.assistant.ask("вопрос", None).await;
    assert!(outcome.degraded);
    assert_eq!(web.state.chat_requests.lock().unwrap().len(), 3);
}
