// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context endpoint (POST /api/context)

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::server::AppState;

/// Request body for POST /api/context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextApiRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Response body for POST /api/context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextApiResponse {
    pub query: String,
    pub context: String,
}

/// POST /api/context - Retrieve the bounded context for a query (cached)
pub async fn context_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContextApiRequest>, JsonRejection>,
) -> Result<Json<ContextApiResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let query = request
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::missing_parameter("query"))?;

    debug!("Context request: {}", query);
    let context = state.retrieval.get_or_build(&query).await;

    Ok(Json(ContextApiResponse { query, context }))
}
