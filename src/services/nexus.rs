//! Nexus service — the AI companion behind the chat and journal endpoints.
//!
//! DESIGN
//! ======
//! Both operations are pass-throughs: wrap the caller-supplied material in
//! the fixed persona prompt, forward to the configured LLM, relay the text.
//! Rate limits are checked before any provider call and token usage recorded
//! after.

use std::sync::{Arc, OnceLock};

use tracing::info;
use uuid::Uuid;

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};
use crate::rate_limit::RateLimitError;
use crate::state::AppState;

const DEFAULT_CHAT_MAX_TOKENS: u32 = 1024;
const DEFAULT_MARGIN_NOTE_MAX_TOKENS: u32 = 256;

const CHAT_SYSTEM_PROMPT: &str = "You are Nexus, an AI spirit living in the 'Continuity' application.\n\
Your purpose is to help the user maintain flow, balance their energy, and achieve their goals.\n\
You are calm, concise, and slightly mystical but grounded in productivity.\n\
You prioritize \"Consistency > Intensity\".\n\
\n\
Use the following context about the user's current life (Tasks and Vision) to guide your advice.\n\
If the user asks \"What should I do?\", look at their tasks and suggest something small to start.\n\
Refer to their Horizon goals to keep them motivated.\n";

const MARGIN_NOTE_SYSTEM_PROMPT: &str = "You are 'Nexus', a digital spirit companion in a journaling app called 'The Chronicle'.\n\
Your goal is to be supportive, observant, and concise.\n\
Analyze the user's journal entry.\n\
- If they are venting about stress/failure: Offer validation and a gentle reminder of their resilience.\n\
- If they are celebrating a win (big or small): Offer a \"High Five\" and enthusiastic reinforcement.\n\
- If they are neutral/reflective: Offer a deep, philosophical (but not cheesy) observation.\n\
\n\
Your output must be a SINGLE sentence/short paragraph, formatted as a \"Margin Note\" (handwritten style comment).\n\
Do not offer advice unless explicitly asked. Just be there with them.\n\
Keep it under 30 words.\n";

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn chat_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("NEXUS_CHAT_MAX_TOKENS", DEFAULT_CHAT_MAX_TOKENS))
}

fn margin_note_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("NEXUS_MARGIN_NOTE_MAX_TOKENS", DEFAULT_MARGIN_NOTE_MAX_TOKENS))
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NexusError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("conversation is empty")]
    EmptyConversation,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("rate limited: {0}")]
    RateLimited(String),
}

impl From<RateLimitError> for NexusError {
    fn from(e: RateLimitError) -> Self {
        Self::RateLimited(e.to_string())
    }
}

// =============================================================================
// PROMPT ASSEMBLY
// =============================================================================

/// Persona prompt plus the caller-supplied context block.
#[must_use]
pub fn build_chat_system(context: &str) -> String {
    if context.trim().is_empty() {
        CHAT_SYSTEM_PROMPT.to_string()
    } else {
        format!("{CHAT_SYSTEM_PROMPT}\n{context}\n")
    }
}

/// Drop a leading assistant welcome message so the history starts with the
/// user, and drop messages with empty roles. Providers reject histories that
/// open on the assistant's side.
#[must_use]
pub fn normalize_history(messages: &[Message]) -> Vec<Message> {
    let mut history: Vec<Message> = messages
        .iter()
        .filter(|m| !m.content.trim().is_empty())
        .cloned()
        .collect();
    if history.first().is_some_and(|m| m.role == "assistant") {
        history.remove(0);
    }
    history
}

/// The margin-note user prompt for a journal entry.
#[must_use]
pub fn build_margin_note_prompt(content: &str, mood: Option<&str>) -> String {
    format!(
        "User's Mood: {}\n\nJournal Entry:\n\"{content}\"\n\nGenerate your margin note:",
        mood.unwrap_or("Unknown")
    )
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// One retry for transient provider failures (transport errors, 429, 5xx).
/// Anything else fails fast.
async fn chat_with_retry(
    llm: &Arc<dyn LlmChat>,
    max_tokens: u32,
    system: &str,
    messages: &[Message],
) -> Result<crate::llm::types::ChatResponse, LlmError> {
    match llm.chat(max_tokens, system, messages).await {
        Err(e) if e.retryable() => {
            tracing::warn!(error = %e, "nexus: transient provider failure, retrying once");
            llm.chat(max_tokens, system, messages).await
        }
        other => other,
    }
}

/// Forward a chat conversation to the LLM under the Nexus persona.
///
/// # Errors
///
/// Returns [`NexusError::LlmNotConfigured`] when no client is set,
/// [`NexusError::RateLimited`] when a limit trips, or the provider error.
pub async fn chat(
    state: &AppState,
    llm: &Arc<dyn LlmChat>,
    user_id: Uuid,
    messages: &[Message],
    context: &str,
) -> Result<String, NexusError> {
    state.rate_limiter.check_and_record(user_id)?;
    state.rate_limiter.check_token_budget(user_id)?;

    let history = normalize_history(messages);
    if history.is_empty() {
        return Err(NexusError::EmptyConversation);
    }

    let system = build_chat_system(context);
    let response = chat_with_retry(llm, chat_max_tokens(), &system, &history).await?;

    info!(
        %user_id,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        stop_reason = %response.stop_reason,
        "nexus: chat response"
    );
    state
        .rate_limiter
        .record_tokens(user_id, response.input_tokens + response.output_tokens);

    Ok(response.text)
}

/// Generate a margin note for a journal entry.
///
/// # Errors
///
/// Same failure modes as [`chat`].
pub async fn margin_note(
    state: &AppState,
    llm: &Arc<dyn LlmChat>,
    user_id: Uuid,
    content: &str,
    mood: Option<&str>,
) -> Result<String, NexusError> {
    state.rate_limiter.check_and_record(user_id)?;
    state.rate_limiter.check_token_budget(user_id)?;

    let prompt = build_margin_note_prompt(content, mood);
    let messages = [Message::user(prompt)];
    let response = chat_with_retry(llm, margin_note_max_tokens(), MARGIN_NOTE_SYSTEM_PROMPT, &messages).await?;

    info!(
        %user_id,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "nexus: margin note generated"
    );
    state
        .rate_limiter
        .record_tokens(user_id, response.input_tokens + response.output_tokens);

    Ok(response.text)
}

#[cfg(test)]
#[path = "nexus_test.rs"]
mod tests;
