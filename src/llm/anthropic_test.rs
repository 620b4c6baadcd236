use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Consistency over intensity." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "Consistency over intensity.");
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_joins_multiple_text_blocks() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "First." },
        { "type": "text", "text": "Second." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "First.\nSecond.");
}

#[test]
fn parse_skips_unknown_block_types() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "hmm" },
        { "type": "text", "text": "Answer." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "Answer.");
}

#[test]
fn parse_empty_content_yields_empty_text() {
    let json = make_response(serde_json::json!([]));
    let resp = parse_response(&json).unwrap();
    assert!(resp.text.is_empty());
}

#[test]
fn parse_invalid_json_is_api_parse_error() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_missing_usage_is_api_parse_error() {
    let json = serde_json::json!({
        "content": [],
        "model": "m",
        "stop_reason": "end_turn"
    })
    .to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}
