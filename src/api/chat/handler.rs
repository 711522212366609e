// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat API endpoint handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{debug, info, warn};

use super::request::ChatApiRequest;
use super::response::ChatApiResponse;
use crate::api::errors::ApiError;
use crate::api::server::AppState;

/// POST /api/chat - Answer one user utterance
///
/// # Request
/// - `user_id`: Caller identifier, string or number (optional, enables memory)
/// - `text`: User utterance (required)
/// - `request_id`: Echoed back unchanged (optional)
/// - `annotate`: Append fact-check verdicts to the answer (default false)
///
/// # Errors
/// - 400 Bad Request: Missing or blank `text`, malformed JSON
///
/// Generation failures are not errors here: the answer is the apology text
/// and `degraded` is true.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatApiRequest>, JsonRejection>,
) -> Result<Json<ChatApiResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected chat request: {}", e.body_text());
        ApiError::InvalidRequest(e.body_text())
    })?;

    let text = request.text().ok_or_else(|| ApiError::missing_parameter("text"))?;
    let user_key = request.user_key();
    debug!(
        "Chat request from {:?}: {}",
        user_key,
        text.chars().take(50).collect::<String>()
    );

    let outcome = state.assistant.ask(text, user_key.as_deref()).await;
    let answer = if request.annotate {
        outcome.verification.annotate(&outcome.answer)
    } else {
        outcome.answer.clone()
    };

    info!(
        "Answer for {:?} sent: {}",
        user_key,
        answer.chars().take(50).collect::<String>()
    );

    Ok(Json(ChatApiResponse::new(
        answer,
        request.request_id.clone(),
        &outcome.verification,
        outcome.degraded,
    )))
}
