// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// HTTP API served on a real socket, backed by the fake web

use super::mock::FakeWeb;
use fresh_rag::api::create_router;
use fresh_rag::Services;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use tokio::task::JoinHandle;
use tokio_test::assert_ok;

async fn serve(services: &Services) -> (SocketAddr, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(services.app_state());
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

#[tokio::test]
async fn test_chat_round_trip_over_http() {
    let web = FakeWeb::start().await;
    web.state.set_reply("Курс на 2024 год стабилен.");
    let services = Services::from_config(&web.app_config()).unwrap();
    let (addr, server) = serve(&services).await;

    let client = reqwest::Client::new();
    let response = assert_ok!(
        client
            .post(format!("http://{}/api/chat", addr))
            .json(&json!({"user_id": 12345, "text": "курс доллара", "request_id": "r-1"}))
            .send()
            .await
    );
    assert_eq!(response.status(), 200);

    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body["success"], true);
    assert_eq!(body["request_id"], "r-1");
    assert_eq!(body["answer"], "Курс на 2024 год стабилен.");
    assert_eq!(body["verification"]["2024"], "confirmed");
    assert_eq!(body["degraded"], false);

    // numeric user ids are remembered under their string form
    assert!(services.assistant.memory().snapshot("12345").await.is_some());
    server.abort();
}

#[tokio::test]
async fn test_missing_text_is_rejected_before_any_work() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();
    let (addr, server) = serve(&services).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/chat", addr))
        .json(&json!({"user_id": 1}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "error": "Missing text parameter"}));
    assert_eq!(web.state.google_hits(), 0);
    assert!(web.state.chat_requests.lock().unwrap().is_empty());
    server.abort();
}

#[tokio::test]
async fn test_backend_outage_still_answers_200() {
    let web = FakeWeb::start().await;
    web.state.chat_status.store(500, Ordering::SeqCst);
    let services = Services::from_config(&web.app_config()).unwrap();
    let (addr, server) = serve(&services).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/chat", addr))
        .json(&json!({"text": "новости"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["degraded"], true);
    assert_eq!(
        body["answer"],
        "🔍 Произошла ошибка при генерации или проверке информации."
    );
    server.abort();
}

#[tokio::test]
async fn test_context_and_health_share_cache() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();
    let (addr, server) = serve(&services).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("http://{}/api/context", addr))
        .json(&json!({"query": "курс доллара"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["context"]
        .as_str()
        .unwrap()
        .ends_with("Всего источников: 3"));

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["cache"]["entries"], 1);
    assert_eq!(health["cache"]["misses"], 1);
    server.abort();
}
