//! Nexus routes — AI chat and journal analysis.
//!
//! These endpoints forward caller-supplied material to the configured LLM
//! under fixed persona prompts. Context assembly happens on the clients,
//! which already hold the user's boards in memory.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::auth::AuthUser;
use crate::llm::types::Message;
use crate::services::nexus::{self, NexusError};
use crate::state::AppState;

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn nexus_error_to_response(err: &NexusError) -> ErrorResponse {
    let status = match err {
        NexusError::EmptyConversation => StatusCode::BAD_REQUEST,
        NexusError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        NexusError::LlmNotConfigured | NexusError::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "nexus request failed");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

// =============================================================================
// CHAT
// =============================================================================

#[derive(Deserialize)]
pub struct ChatBody {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub context: String,
}

#[derive(Serialize)]
pub struct ChatReply {
    pub role: &'static str,
    pub content: String,
}

/// `POST /api/nexus/chat`
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ErrorResponse> {
    let llm = state
        .llm
        .clone()
        .ok_or_else(|| nexus_error_to_response(&NexusError::LlmNotConfigured))?;

    let content = nexus::chat(&state, &llm, auth.user.id, &body.messages, &body.context)
        .await
        .map_err(|e| nexus_error_to_response(&e))?;

    Ok(Json(ChatReply { role: "assistant", content }))
}

// =============================================================================
// JOURNAL ANALYSIS
// =============================================================================

#[derive(Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub content: String,
    pub mood: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeReply {
    pub margin_note: String,
}

/// `POST /api/journal/analyze`
pub async fn analyze_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeReply>, ErrorResponse> {
    if body.content.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "content is required" })),
        ));
    }

    let llm = state
        .llm
        .clone()
        .ok_or_else(|| nexus_error_to_response(&NexusError::LlmNotConfigured))?;

    let margin_note = nexus::margin_note(&state, &llm, auth.user.id, &body.content, body.mood.as_deref())
        .await
        .map_err(|e| nexus_error_to_response(&e))?;

    Ok(Json(AnalyzeReply { margin_note }))
}

#[cfg(test)]
#[path = "nexus_test.rs"]
mod tests;
