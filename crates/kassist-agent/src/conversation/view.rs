//! One agent's view of the shared transcript as chat messages.

use crate::transcript::{Role, Transcript, TurnAttachment};
use crate::types::ChatMessage;

/// Build the message list an agent answers to.
///
/// The persona comes first as a system message. The agent's own turns are
/// `assistant` messages (tool requests included) and its tool results are
/// `tool` messages. The other agent's content turns are `user` messages;
/// the other agent's tool traffic is not shown.
pub fn agent_view(transcript: &Transcript, identity: &str, persona: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    if !persona.trim().is_empty() {
        messages.push(ChatMessage::system(persona));
    }

    for turn in transcript.turns() {
        if turn.is_from(identity) {
            match (&turn.role, &turn.attachments) {
                (Role::Tool, Some(TurnAttachment::ToolResult { tool_call_id, .. })) => {
                    messages.push(ChatMessage::tool_result(tool_call_id, &turn.content));
                }
                (_, Some(TurnAttachment::ToolCalls { calls })) => {
                    let content = Some(turn.content.as_str()).filter(|c| !c.is_empty());
                    messages.push(ChatMessage::assistant_with_tool_calls(content, calls.clone()));
                }
                _ => messages.push(ChatMessage::assistant(&turn.content)),
            }
        } else if !turn.is_tool_traffic() {
            let msg = ChatMessage::user(&turn.content);
            messages.push(match turn.name.as_deref().filter(|n| is_valid_name(n)) {
                Some(name) => msg.named(name),
                None => msg,
            });
        }
    }
    messages
}

/// OpenAI accepts `name` matching `[A-Za-z0-9_-]{1,64}`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Turn;
    use crate::types::{ToolCall, ToolResult};

    fn sample() -> Transcript {
        let mut t = Transcript::new();
        t.push(Turn::opening("user_proxy", "Who studies HCI?"));
        t.push(Turn::tool_request(
            "assistant",
            "",
            vec![ToolCall::function("c1", "search_by_expert", r#"{"discipline":["HCI"]}"#)],
        ));
        t.push(Turn::tool_result(
            "assistant",
            &ToolResult {
                tool_call_id: "c1".into(),
                tool_name: "search_by_expert".into(),
                content: "[...]".into(),
                is_error: false,
            },
        ));
        t.push(Turn::reply("assistant", "Carla Gomez."));
        t
    }

    #[test]
    fn test_responder_view() {
        let view = agent_view(&sample(), "assistant", "You help.");
        let roles: Vec<&str> = view.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "tool", "assistant"]);
        assert_eq!(view[1].name.as_deref(), Some("user_proxy"));
        assert!(view[2].content.is_none());
        assert_eq!(view[3].tool_call_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_initiator_view_hides_other_tool_traffic() {
        let view = agent_view(&sample(), "user_proxy", "");
        let roles: Vec<&str> = view.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["assistant", "user"]);
        assert_eq!(view[1].content.as_deref(), Some("Carla Gomez."));
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("Teacher_Agent"));
        assert!(is_valid_name("K-Assistant"));
        assert!(!is_valid_name("K Assistant"));
        assert!(!is_valid_name(""));
    }
}
