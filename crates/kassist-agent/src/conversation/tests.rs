//! Tests for the conversation loop.

use super::*;
use crate::tools::{ToolBindings, ToolKind};
use crate::transcript::Role;
use crate::types::{NullSink, ToolCall};
use async_trait::async_trait;
use kassist_core::config::NewsConfig;
use kassist_news::{NewsError, NewsTable, PageSource};

struct OfflineNews;

#[async_trait]
impl PageSource for OfflineNews {
    async fn fetch_page(&self, page: u32, _section: &str) -> Result<NewsTable, NewsError> {
        Err(NewsError::Fetch {
            page,
            reason: "offline".to_string(),
        })
    }
}

fn registry() -> ToolRegistry {
    ToolRegistry::new(NewsConfig::default(), Box::new(OfflineNews))
}

fn limits(max_turns: usize, max_tool_rounds: usize) -> ConversationConfig {
    ConversationConfig {
        max_turns,
        max_tool_rounds,
        sentinel: "ALL DONE".to_string(),
    }
}

fn scripted(identity: &str, replies: Vec<AgentReply>) -> (Agent, ScriptedModel) {
    let model = ScriptedModel::new(replies);
    let agent = Agent::new(identity, &format!("You are {identity}."), Box::new(model.clone()));
    (agent, model)
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

impl EventSink for RecordingSink {
    fn on_text(&mut self, speaker: &str, text: &str) {
        self.events.push(format!("text {speaker}: {text}"));
    }
    fn on_tool_call(&mut self, speaker: &str, name: &str, _arguments: &str) {
        self.events.push(format!("call {speaker}: {name}"));
    }
    fn on_tool_result(&mut self, name: &str, _result: &str, is_error: bool) {
        self.events.push(format!("result {name}: error={is_error}"));
    }
}

#[tokio::test]
async fn test_single_turn_budget_with_terminating_opening() {
    let reg = registry();
    let (proxy, _) = scripted("user_proxy", vec![]);
    let proxy = proxy.with_termination(TerminationRule::sentinel("ALL DONE"));
    let (assistant, model) = scripted("assistant", vec![AgentReply::text("never used")]);

    let outcome = Conversation::new(&reg, &limits(1, 3))
        .run(&proxy, &assistant, "Nothing to do. ALL DONE", &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.transcript.len(), 1);
    assert_eq!(outcome.transcript.turns()[0].role, Role::User);
    assert_eq!(outcome.stop, StopReason::Terminated { by: "user_proxy".into() });
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn test_opening_sentinel_stops_before_any_reply() {
    let reg = registry();
    let (proxy, _) = scripted("user_proxy", vec![]);
    let (assistant, model) = scripted("assistant", vec![AgentReply::text("hi")]);
    let assistant = assistant.with_termination(TerminationRule::sentinel("ALL DONE"));

    let outcome = Conversation::new(&reg, &limits(6, 3))
        .run(&proxy, &assistant, "ALL DONE", &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.transcript.len(), 1);
    assert_eq!(outcome.stop, StopReason::Terminated { by: "assistant".into() });
    assert!(model.requests().is_empty());
}

#[tokio::test]
async fn test_turn_budget_counts_opening() {
    let reg = registry();
    let (student, _) = scripted("Student_Agent", vec![AgentReply::text("Why is 2+2=4?")]);
    let (teacher, _) = scripted(
        "Teacher_Agent",
        vec![AgentReply::text("Let's count."), AgentReply::text("Exactly.")],
    );

    let outcome = Conversation::new(&reg, &limits(4, 3))
        .run(&student, &teacher, "Teach me addition.", &mut NullSink)
        .await
        .unwrap();

    let speakers: Vec<&str> = outcome
        .transcript
        .turns()
        .iter()
        .map(|t| t.name.as_deref().unwrap())
        .collect();
    assert_eq!(
        speakers,
        vec!["Student_Agent", "Teacher_Agent", "Student_Agent", "Teacher_Agent"]
    );
    assert_eq!(outcome.stop, StopReason::TurnBudget);
}

#[tokio::test]
async fn test_storyteller_flow_ends_on_sentinel() {
    let reg = registry();
    let proxy = Agent::new("user_proxy", "", Box::new(SilentModel))
        .with_termination(TerminationRule::sentinel("ALL DONE"));
    let (assistant, model) = scripted(
        "assistant",
        vec![AgentReply::text("Once upon a time, Gild..."), AgentReply::text("ALL DONE")],
    );
    let assistant = assistant.with_termination(TerminationRule::MaxTurns(2));

    let outcome = Conversation::new(&reg, &limits(10, 3))
        .run(&proxy, &assistant, "Give me a story.", &mut NullSink)
        .await
        .unwrap();

    let contents: Vec<&str> = outcome.transcript.turns().iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["Give me a story.", "Once upon a time, Gild...", "", "ALL DONE"]);
    assert_eq!(outcome.stop, StopReason::Terminated { by: "user_proxy".into() });

    // Second request sees the silent proxy turn as an empty user message.
    let second = &model.requests()[1];
    assert_eq!(second.last().unwrap().role, "user");
    assert_eq!(second.last().unwrap().content.as_deref(), Some(""));
}

#[tokio::test]
async fn test_tool_round_then_answer() {
    let reg = registry();
    let (proxy, _) = scripted("user_proxy", vec![]);
    let proxy = proxy.with_termination(TerminationRule::sentinel("ALL DONE"));
    let (assistant, model) = scripted(
        "assistant",
        vec![
            AgentReply::tool_calls(vec![ToolCall::function(
                "call_1",
                "search_by_expert",
                r#"{"discipline": ["Digital Sociology", "HCI"]}"#,
            )]),
            AgentReply::text("Gild and Carla Gomez. ALL DONE"),
        ],
    );
    let assistant = assistant.with_tools(ToolBindings::all());
    let mut sink = RecordingSink::default();

    let outcome = Conversation::new(&reg, &limits(2, 3))
        .run(&proxy, &assistant, "Who works on sociology or HCI?", &mut sink)
        .await
        .unwrap();

    let roles: Vec<Role> = outcome.transcript.turns().iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::Tool, Role::Assistant]);
    assert_eq!(outcome.transcript.non_tool_turns(), 2);
    assert_eq!(outcome.tool_calls, 1);
    assert_eq!(outcome.failed_tool_calls, 0);
    assert!(outcome.transcript.turns()[2].content.contains("carla.gomez@domain.net"));
    assert_eq!(outcome.stop, StopReason::Terminated { by: "user_proxy".into() });

    // The follow-up request carries the tool exchange.
    let follow_up = &model.requests()[1];
    let roles: Vec<&str> = follow_up.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "tool"]);

    assert_eq!(
        sink.events,
        vec![
            "text user_proxy: Who works on sociology or HCI?",
            "call assistant: search_by_expert",
            "result search_by_expert: error=false",
            "text assistant: Gild and Carla Gomez. ALL DONE",
        ]
    );
}

#[tokio::test]
async fn test_malformed_tool_calls_hit_ceiling() {
    let reg = registry();
    let (proxy, _) = scripted("user_proxy", vec![]);
    let bad = |id: &str| AgentReply::tool_calls(vec![ToolCall::function(id, "search_by_expert", "{oops")]);
    let (assistant, _) = scripted("assistant", vec![bad("c1"), bad("c2"), bad("c3"), AgentReply::text("late")]);
    let assistant = assistant.with_tools(ToolBindings::all());

    let err = Conversation::new(&reg, &limits(4, 3))
        .run(&proxy, &assistant, "find experts", &mut NullSink)
        .await
        .unwrap_err();

    match err {
        ConversationError::ToolLoopExceeded { agent, limit } => {
            assert_eq!(agent, "assistant");
            assert_eq!(limit, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unbound_tool_becomes_error_turn_and_continues() {
    let reg = registry();
    let (proxy, _) = scripted("Student_Agent", vec![]);
    let (teacher, _) = scripted(
        "Teacher_Agent",
        vec![
            AgentReply::tool_calls(vec![ToolCall::function("c1", "get_time", "{}")]),
            AgentReply::text("I cannot check the time."),
        ],
    );

    let outcome = Conversation::new(&reg, &limits(2, 3))
        .run(&proxy, &teacher, "What time is it?", &mut NullSink)
        .await
        .unwrap();

    let tool_turn = &outcome.transcript.turns()[2];
    assert_eq!(tool_turn.role, Role::Tool);
    assert!(tool_turn.content.starts_with("Error: "));
    assert_eq!(outcome.failed_tool_calls, 1);
    assert_eq!(outcome.transcript.last().unwrap().content, "I cannot check the time.");
    assert_eq!(outcome.stop, StopReason::TurnBudget);
}

#[tokio::test]
async fn test_news_failure_is_recovered_as_tool_error() {
    let reg = registry();
    let (proxy, _) = scripted("user_proxy", vec![]);
    let (assistant, _) = scripted(
        "assistant",
        vec![
            AgentReply::tool_calls(vec![ToolCall::function("c1", "search_by_news", r#"{"query": "typhoon"}"#)]),
            AgentReply::text("The news service is unavailable."),
        ],
    );
    let assistant = assistant.with_tool(ToolKind::SearchByNews);

    let outcome = Conversation::new(&reg, &limits(2, 3))
        .run(&proxy, &assistant, "Any typhoon news?", &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.failed_tool_calls, 1);
    assert!(outcome.transcript.turns()[2].content.contains("empty"));
}

#[tokio::test]
async fn test_model_failure_is_reported() {
    let reg = registry();
    let (proxy, _) = scripted("user_proxy", vec![]);
    let (assistant, _) = scripted("assistant", vec![]);

    let err = Conversation::new(&reg, &limits(4, 3))
        .run(&proxy, &assistant, "hello", &mut NullSink)
        .await
        .unwrap_err();

    assert!(matches!(err, ConversationError::Model { ref agent, .. } if agent == "assistant"));
    assert!(err.to_string().contains("script exhausted"));
}

#[tokio::test]
async fn test_empty_reply_is_still_a_turn() {
    let reg = registry();
    let (a, _) = scripted("a", vec![]);
    let (b, _) = scripted("b", vec![AgentReply::default()]);

    let outcome = Conversation::new(&reg, &limits(2, 3))
        .run(&a, &b, "ping", &mut NullSink)
        .await
        .unwrap();

    assert_eq!(outcome.transcript.len(), 2);
    assert_eq!(outcome.transcript.last().unwrap().content, "");
}
