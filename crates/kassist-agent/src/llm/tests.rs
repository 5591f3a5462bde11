//! Tests for the LLM client.

use super::*;
use crate::types::{FunctionDef, ToolCall, ToolDefinition};
use serde_json::json;

#[test]
fn test_request_body_omits_empty_tools() {
    let messages = vec![ChatMessage::system("You are a math teacher."), ChatMessage::user("2+2?")];
    let body = request_body("gpt-4o-mini", &messages, Some(&[] as &[ToolDefinition]), None).unwrap();

    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert!(body.get("tools").is_none());
    assert!(body.get("temperature").is_none());
}

#[test]
fn test_request_body_with_tools_and_temperature() {
    let tools = vec![ToolDefinition {
        tool_type: "function".to_string(),
        function: FunctionDef {
            name: "get_time".to_string(),
            description: "Current local time".to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        },
    }];
    let body = request_body("m", &[ChatMessage::user("hi")], Some(tools.as_slice()), Some(0.2)).unwrap();

    assert_eq!(body["temperature"], 0.2);
    assert_eq!(body["tools"][0]["type"], "function");
    assert_eq!(body["tools"][0]["function"]["name"], "get_time");
}

#[test]
fn test_parse_response_with_tool_calls() {
    let raw = json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "search_by_expert", "arguments": "{\"name\": \"Gild\"}"}
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    });
    let resp: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
    let msg = resp.first_message().unwrap();

    assert!(msg.content.is_none());
    let calls: &Vec<ToolCall> = msg.tool_calls.as_ref().unwrap();
    assert_eq!(calls[0].function.name, "search_by_expert");
}

#[test]
fn test_parse_response_without_optional_fields() {
    let raw = json!({"choices": [{"message": {"content": "hello"}}]});
    let resp: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
    assert_eq!(resp.first_message().unwrap().content.as_deref(), Some("hello"));
    assert!(resp.usage.is_none());
}

#[test]
fn test_client_trims_trailing_slash() {
    let client = LlmClient::new("https://api.example.com/v1/", "k", std::time::Duration::from_secs(5)).unwrap();
    assert_eq!(client.api_base(), "https://api.example.com/v1");
}
