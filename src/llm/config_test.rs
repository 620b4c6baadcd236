use super::*;

// =============================================================================
// OpenAiApiMode
// =============================================================================

#[test]
fn openai_mode_defaults_to_responses() {
    assert_eq!(OpenAiApiMode::parse(None).unwrap(), OpenAiApiMode::Responses);
}

#[test]
fn openai_mode_parses_chat_completions() {
    assert_eq!(OpenAiApiMode::parse(Some("chat_completions")).unwrap(), OpenAiApiMode::ChatCompletions);
}

#[test]
fn openai_mode_rejects_unknown() {
    let err = OpenAiApiMode::parse(Some("completions")).unwrap_err();
    assert!(matches!(err, LlmError::ConfigParse(_)));
}

// =============================================================================
// defaults
// =============================================================================

#[test]
fn default_models_per_provider() {
    assert_eq!(ProviderConfig::Anthropic.default_model(), "claude-sonnet-4-5-20250929");
    let openai = ProviderConfig::OpenAi {
        mode: OpenAiApiMode::Responses,
        base_url: DEFAULT_OPENAI_BASE_URL.into(),
    };
    assert_eq!(openai.default_model(), "gpt-4o");
}

#[test]
fn timeout_defaults() {
    let t = LlmTimeouts::default();
    assert_eq!(t.request_secs, 120);
    assert_eq!(t.connect_secs, 10);
}

#[test]
fn env_parse_u64_falls_back_on_missing() {
    assert_eq!(env_parse_u64("CONTINUITY_NO_SUCH_VAR", 77), 77);
}
