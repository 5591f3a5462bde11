pub mod ask;
pub mod chat;
pub mod classify;
pub mod lookup;
pub mod news;
pub mod talk;

use anyhow::{Context, Result};
use serde::Serialize;

use kassist_agent::{
    ChatModel, ConversationOutcome, DisplayMessage, EventSink, LlmChatModel, StopReason, Transcript,
};
use kassist_core::config::{ConversationConfig, LlmConfig, SessionConfig};

use crate::cli::LlmArgs;

const SECTION_SEP: &str = "──────────────────────────────────────";

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to create tokio runtime")
}

/// LLM settings from the environment with CLI overrides applied.
pub(crate) fn llm_config(args: &LlmArgs) -> Result<LlmConfig> {
    let Some(mut cfg) = LlmConfig::try_from_env() else {
        anyhow::bail!(
            "No LLM API key configured. Set KASSIST_API_KEY (or OPENAI_API_KEY) in the environment or .env"
        );
    };
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    if let Some(base) = &args.api_base {
        cfg.api_base = base.clone();
    }
    Ok(cfg)
}

pub(crate) fn conversation_config(args: &LlmArgs) -> ConversationConfig {
    let mut cfg = ConversationConfig::from_env();
    if let Some(n) = args.max_turns {
        cfg.max_turns = n;
    }
    if let Some(s) = &args.sentinel {
        cfg.sentinel = s.clone();
    }
    cfg
}

pub(crate) fn session_config(user_name: Option<String>, language: Option<String>) -> SessionConfig {
    let mut cfg = SessionConfig::from_env();
    if let Some(name) = user_name {
        cfg.user_name = name;
    }
    if let Some(lang) = language {
        cfg.language = lang;
    }
    cfg
}

pub(crate) fn build_model(cfg: &LlmConfig) -> Result<Box<dyn ChatModel>> {
    let model = LlmChatModel::from_config(cfg).context("Failed to create LLM client")?;
    Ok(Box::new(model))
}

/// Terminal sink: tool activity goes to stderr, turns are printed after the
/// conversation from the rendered transcript.
pub(crate) struct TerminalSink {
    verbose: bool,
    tools_shown: bool,
}

impl TerminalSink {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            tools_shown: false,
        }
    }
}

impl EventSink for TerminalSink {
    fn on_text(&mut self, speaker: &str, text: &str) {
        tracing::debug!(speaker, chars = text.len(), "turn");
    }

    fn on_tool_call(&mut self, speaker: &str, name: &str, arguments: &str) {
        if !self.tools_shown {
            self.tools_shown = true;
            eprintln!("─── 🔧 tools ─── {}", SECTION_SEP);
        }
        if self.verbose {
            eprintln!("🔧 {} → {}  args={}", speaker, name, truncate(arguments, 200));
        } else {
            eprintln!("🔧 {}", name);
        }
    }

    fn on_tool_result(&mut self, name: &str, result: &str, is_error: bool) {
        let icon = if is_error { "❌" } else { "✅" };
        let first = result.lines().next().unwrap_or("(ok)");
        let limit = if self.verbose { 400 } else { 80 };
        eprintln!("  {} {} {}", icon, name, truncate(first, limit));
    }
}

/// Shorten `s` to at most `max` characters, marking the cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

/// One-line error text; pulls `error.message` out of API error bodies.
pub(crate) fn format_error(e: &anyhow::Error) -> String {
    let s = format!("{:#}", e);
    if let Some(json_start) = s.find('{') {
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(&s[json_start..]) {
            if let Some(msg) = v
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return format!("API error: {}", msg);
            }
        }
    }
    truncate(&s, 200)
}

pub(crate) fn print_messages(messages: &[DisplayMessage]) {
    for m in messages {
        let who = m.speaker.as_deref().unwrap_or("?");
        println!("[{}]\n{}\n", who, m.content);
    }
}

#[derive(Serialize)]
struct OutcomeReport<'a> {
    stop: String,
    tool_calls: usize,
    failed_tool_calls: usize,
    transcript: &'a Transcript,
}

pub(crate) fn describe_stop(stop: &StopReason) -> String {
    match stop {
        StopReason::Terminated { by } => format!("terminated by {}", by),
        StopReason::TurnBudget => "turn budget reached".to_string(),
    }
}

pub(crate) fn outcome_json(outcome: &ConversationOutcome) -> Result<String> {
    let report = OutcomeReport {
        stop: describe_stop(&outcome.stop),
        tool_calls: outcome.tool_calls,
        failed_tool_calls: outcome.failed_tool_calls,
        transcript: &outcome.transcript,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize transcript")
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("繁體中文", 2), "繁體…");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }

    #[test]
    fn test_format_error_extracts_api_message() {
        let e = anyhow::anyhow!(
            "LLM API error (401): {}",
            r#"{"error":{"message":"Incorrect API key provided"}}"#
        );
        assert_eq!(format_error(&e), "API error: Incorrect API key provided");

        let plain = anyhow::anyhow!("connection refused");
        assert_eq!(format_error(&plain), "connection refused");
    }

    #[test]
    fn test_describe_stop() {
        assert_eq!(
            describe_stop(&StopReason::Terminated { by: "user_proxy".into() }),
            "terminated by user_proxy"
        );
        assert_eq!(describe_stop(&StopReason::TurnBudget), "turn budget reached");
    }

    #[test]
    fn test_conversation_config_overrides() {
        let args = LlmArgs {
            max_turns: Some(7),
            sentinel: Some("FIN".into()),
            ..LlmArgs::default()
        };
        let cfg = conversation_config(&args);
        assert_eq!(cfg.max_turns, 7);
        assert_eq!(cfg.sentinel, "FIN");
    }
}
