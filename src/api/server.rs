// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    http::Uri,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::chat::chat_handler;
use super::context::context_handler;
use super::errors::ApiError;
use crate::assistant::Assistant;
use crate::rag::RetrievalCache;
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub retrieval: Arc<RetrievalCache>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service descriptor
        .route("/", get(root_handler))
        // Health check
        .route("/health", get(health_handler))
        // Answer endpoint
        .route("/api/chat", post(chat_handler))
        // Raw retrieval
        .route("/api/context", post(context_handler))
        .fallback(not_found_handler)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn start_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "service": "fresh-rag",
        "status": "running",
        "build": version::get_version_info(),
        "endpoints": {
            "chat": "/api/chat",
            "context": "/api/context",
            "health": "/health",
        }
    }))
}

async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Unknown endpoint {}", uri.path()))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let cache = state.retrieval.stats().await;
    Json(json!({
        "status": "ok",
        "cache": cache,
        "users_in_memory": state.assistant.memory().len().await,
    }))
}
