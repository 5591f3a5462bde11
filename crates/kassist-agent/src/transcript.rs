//! Append-only conversation transcript.

use serde::{Deserialize, Serialize};

use crate::types::{ToolCall, ToolResult};

/// Speaker role of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// Structured payload carried next to a turn's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnAttachment {
    /// The agent asked for these tool invocations.
    ToolCalls { calls: Vec<ToolCall> },
    /// Result of one invocation.
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        is_error: bool,
    },
}

/// One entry of the transcript.
///
/// `name` is the identity of the agent the turn belongs to. For tool turns
/// that is the agent which requested the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<TurnAttachment>,
}

impl Turn {
    /// The opening message of a conversation.
    pub fn opening(speaker: &str, content: &str) -> Self {
        Self {
            role: Role::User,
            name: Some(speaker.to_string()),
            content: content.to_string(),
            attachments: None,
        }
    }

    pub fn reply(speaker: &str, content: &str) -> Self {
        Self {
            role: Role::Assistant,
            name: Some(speaker.to_string()),
            content: content.to_string(),
            attachments: None,
        }
    }

    pub fn tool_request(speaker: &str, content: &str, calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            name: Some(speaker.to_string()),
            content: content.to_string(),
            attachments: Some(TurnAttachment::ToolCalls { calls }),
        }
    }

    pub fn tool_result(speaker: &str, result: &ToolResult) -> Self {
        Self {
            role: Role::Tool,
            name: Some(speaker.to_string()),
            content: result.content.clone(),
            attachments: Some(TurnAttachment::ToolResult {
                tool_call_id: result.tool_call_id.clone(),
                tool_name: result.tool_name.clone(),
                is_error: result.is_error,
            }),
        }
    }

    /// Tool requests and tool results; they do not consume the turn budget.
    pub fn is_tool_traffic(&self) -> bool {
        self.role == Role::Tool || self.tool_calls().is_some()
    }

    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        match &self.attachments {
            Some(TurnAttachment::ToolCalls { calls }) => Some(calls),
            _ => None,
        }
    }

    pub fn is_from(&self, speaker: &str) -> bool {
        self.name.as_deref() == Some(speaker)
    }
}

/// Ordered, append-only list of turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns that count against the turn budget.
    pub fn non_tool_turns(&self) -> usize {
        self.turns.iter().filter(|t| !t.is_tool_traffic()).count()
    }

    /// Non-tool turns spoken by `speaker`.
    pub fn non_tool_turns_by(&self, speaker: &str) -> usize {
        self.turns
            .iter()
            .filter(|t| !t.is_tool_traffic() && t.is_from(speaker))
            .count()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_skip_tool_traffic() {
        let mut t = Transcript::new();
        t.push(Turn::opening("user_proxy", "hi"));
        t.push(Turn::tool_request(
            "assistant",
            "",
            vec![ToolCall::function("c1", "get_time", "{}")],
        ));
        t.push(Turn::tool_result(
            "assistant",
            &ToolResult {
                tool_call_id: "c1".into(),
                tool_name: "get_time".into(),
                content: "Current time in your location: now".into(),
                is_error: false,
            },
        ));
        t.push(Turn::reply("assistant", "It is now."));

        assert_eq!(t.len(), 4);
        assert_eq!(t.non_tool_turns(), 2);
        assert_eq!(t.non_tool_turns_by("assistant"), 1);
        assert_eq!(t.last().unwrap().content, "It is now.");
    }

    #[test]
    fn test_json_shape() {
        let mut t = Transcript::new();
        t.push(Turn::opening("Student_Agent", "What is 2+2?"));
        let v = t.to_json();
        assert_eq!(
            v,
            serde_json::json!([{"role": "user", "name": "Student_Agent", "content": "What is 2+2?"}])
        );
    }
}
