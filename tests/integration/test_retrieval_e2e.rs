// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Search → fan-out extraction → context → cache, over real HTTP clients

use super::mock::{FakeWeb, UNKNOWN_MARKER};
use fresh_rag::rag::{insufficient_information, TRUNCATION_MARKER};
use fresh_rag::Services;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_partial_extraction_failures_keep_three_sources() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    let (context, report) = services.builder.build_with_report("курс доллара").await;

    assert_eq!(report.attempted, 5);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed.len(), 2);
    assert!(report.failed.iter().any(|(url, _)| url.ends_with("/page/2")));
    assert!(report.failed.iter().any(|(url, reason)| url.ends_with("/page/4")
        && reason.contains("image/png")));

    assert!(context.starts_with("🔍 Информация по 'курс доллара':"));
    assert_eq!(context.matches("Источник ").count(), 3);
    assert!(context.contains("Источник 1 | 127.0.0.1:"));
    assert!(context.ends_with("Всего источников: 3"));
    assert!(!context.contains("trackVisitor"));
    assert!(!context.contains("JavaScript"));
}

#[tokio::test]
async fn test_engine_sees_rewritten_query() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    services.builder.build("как узнать курс доллара").await;

    let queries = web.state.google_queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].starts_with("узнать курс доллара актуальная информация "));
    assert!(!queries[0].contains("как"));
}

#[tokio::test]
async fn test_repeated_query_served_from_cache() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    let first = services.retrieval.get_or_build("погода Минск").await;
    let hits_after_first = web.state.google_hits();
    let pages_after_first = web.state.page_hits.load(Ordering::SeqCst);

    let second = services.retrieval.get_or_build("погода Минск").await;

    assert_eq!(first, second);
    assert_eq!(web.state.google_hits(), hits_after_first);
    assert_eq!(web.state.page_hits.load(Ordering::SeqCst), pages_after_first);

    let stats = services.retrieval.stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_no_results_gives_insufficient_message() {
    let web = FakeWeb::start().await;
    let services = Services::from_config(&web.app_config()).unwrap();

    let query = format!("события {}", UNKNOWN_MARKER);
    let context = services.builder.build(&query).await;
    assert_eq!(context, insufficient_information(&query));
    // an empty Google page still lets DuckDuckGo try
    assert_eq!(web.state.ddg_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_google_outage_fails_over_to_duckduckgo() {
    let web = FakeWeb::start().await;
    web.state.google_down.store(true, Ordering::SeqCst);
    let services = Services::from_config(&web.app_config()).unwrap();

    let (context, report) = services.builder.build_with_report("новости").await;

    assert_eq!(web.state.ddg_hits.load(Ordering::SeqCst), 1);
    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 2);
    assert!(context.ends_with("Всего источников: 2"));
}

#[tokio::test]
async fn test_unreachable_search_degrades_to_insufficient() {
    let web = FakeWeb::start().await;
    let mut config = web.app_config();
    config.search.google_url = "http://127.0.0.1:9/search".to_string();
    config.search.duckduckgo_url = "http://127.0.0.1:9/html/".to_string();
    let services = Services::from_config(&config).unwrap();

    let context = services.builder.build("погода").await;
    assert_eq!(context, insufficient_information("погода"));
}

#[tokio::test]
async fn test_small_window_truncates_with_marker() {
    let web = FakeWeb::start().await;
    let mut config = web.app_config();
    config.retrieval.context_window = 300;
    let services = Services::from_config(&config).unwrap();

    let context = services.builder.build("курс").await;
    assert_eq!(context.chars().count(), 300);
    assert!(context.ends_with(TRUNCATION_MARKER));
}
