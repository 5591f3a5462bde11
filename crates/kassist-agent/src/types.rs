//! Shared types: OpenAI-compatible chat wire types and the event sink.

use serde::{Deserialize, Serialize};

// ─── OpenAI-compatible chat types ───────────────────────────────────────────

/// A chat message in OpenAI format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    fn with_role(role: &str, content: Option<String>) -> Self {
        Self {
            role: role.to_string(),
            content,
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn system(content: &str) -> Self {
        Self::with_role("system", Some(content.to_string()))
    }

    pub fn user(content: &str) -> Self {
        Self::with_role("user", Some(content.to_string()))
    }

    pub fn assistant(content: &str) -> Self {
        Self::with_role("assistant", Some(content.to_string()))
    }

    pub fn assistant_with_tool_calls(content: Option<&str>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: Some(tool_calls),
            ..Self::with_role("assistant", content.map(|s| s.to_string()))
        }
    }

    pub fn tool_result(tool_call_id: &str, content: &str) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.to_string()),
            ..Self::with_role("tool", Some(content.to_string()))
        }
    }

    /// Attach a speaker name (OpenAI `name` field).
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// A tool call from the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn function(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }
}

/// Function call details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// OpenAI-compatible tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDef,
}

/// Function definition within a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Result from executing a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub content: String,
    pub is_error: bool,
}

/// Observer for conversation progress (CLI printing, tests, embedding apps).
pub trait EventSink: Send {
    /// A non-tool turn was appended.
    fn on_text(&mut self, speaker: &str, text: &str);
    /// A tool is about to be invoked.
    fn on_tool_call(&mut self, speaker: &str, name: &str, arguments: &str);
    /// A tool returned.
    fn on_tool_result(&mut self, name: &str, result: &str, is_error: bool);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_text(&mut self, _speaker: &str, _text: &str) {}
    fn on_tool_call(&mut self, _speaker: &str, _name: &str, _arguments: &str) {}
    fn on_tool_result(&mut self, _name: &str, _result: &str, _is_error: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serialization_skips_empty_fields() {
        let v = serde_json::to_value(ChatMessage::user("hi").named("Student_Agent")).unwrap();
        assert_eq!(v, serde_json::json!({"role": "user", "content": "hi", "name": "Student_Agent"}));

        let call = ToolCall::function("call_1", "get_time", "{}");
        let v = serde_json::to_value(ChatMessage::assistant_with_tool_calls(None, vec![call])).unwrap();
        assert_eq!(v["role"], "assistant");
        assert!(v.get("content").is_none());
        assert_eq!(v["tool_calls"][0]["type"], "function");
        assert_eq!(v["tool_calls"][0]["function"]["name"], "get_time");
    }
}
