//! Chat endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use super::routes::AppState;
use super::types::{ChatRequest, ChatResponse};
use crate::ai::AiSource;

const MAX_MESSAGE_LEN: usize = 1000;

/// Answer a travel question through the provider fallback chain.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Pesan diperlukan".to_string()));
    }
    if message.len() > MAX_MESSAGE_LEN {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Pesan maksimal {MAX_MESSAGE_LEN} karakter"),
        ));
    }

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let resolved = state.resolver.resolve_chat(message).await;

    Ok(Json(ChatResponse::new(
        resolved.source,
        resolved.payload,
        session_id,
    )))
}

/// Fixed welcome reply, bypassing the provider chain.
pub async fn demo() -> Json<ChatResponse> {
    Json(ChatResponse::new(
        AiSource::Demo,
        crate::ai::baseline::demo_chat(),
        Uuid::new_v4().to_string(),
    ))
}
