// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the fresh-rag service

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "live-web-retrieval",
    "google-search",
    "duckduckgo-search",
    "provider-failover",
    "parallel-extraction",
    "bounded-context",
    "retrieval-cache-lru-ttl",
    "fact-verification",
    "conversation-memory",
    "time-shortcut",
    "configurable-retry",
    "lexicon-files",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("fresh-rag {}", VERSION_NUMBER)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "features": FEATURES,
    })
}
