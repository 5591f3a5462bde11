//! Agents and the model backends that drive them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use kassist_core::config::LlmConfig;

use super::termination::TerminationRule;
use crate::llm::LlmClient;
use crate::tools::{ToolBindings, ToolKind};
use crate::types::{ChatMessage, ToolCall, ToolDefinition};

/// What a model produced for one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentReply {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl AgentReply {
    pub fn text(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls: calls,
        }
    }

    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Backend that turns a message history into the next reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn respond(&self, messages: &[ChatMessage], tools: &[ToolDefinition]) -> Result<AgentReply>;
}

/// One participant of a two-agent conversation.
pub struct Agent {
    identity: String,
    persona: String,
    tools: ToolBindings,
    termination: TerminationRule,
    model: Box<dyn ChatModel>,
}

impl Agent {
    /// Agent with no tools that never asks to stop.
    pub fn new(identity: &str, persona: &str, model: Box<dyn ChatModel>) -> Self {
        Self {
            identity: identity.to_string(),
            persona: persona.to_string(),
            tools: ToolBindings::none(),
            termination: TerminationRule::Never,
            model,
        }
    }

    #[must_use]
    pub fn with_tools(mut self, tools: ToolBindings) -> Self {
        self.tools = tools;
        self
    }

    #[must_use]
    pub fn with_tool(mut self, kind: ToolKind) -> Self {
        self.tools = self.tools.with(kind);
        self
    }

    #[must_use]
    pub fn with_termination(mut self, rule: TerminationRule) -> Self {
        self.termination = rule;
        self
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn tools(&self) -> &ToolBindings {
        &self.tools
    }

    pub fn termination(&self) -> &TerminationRule {
        &self.termination
    }

    pub(crate) async fn respond(&self, messages: &[ChatMessage]) -> Result<AgentReply> {
        self.model.respond(messages, &self.tools.definitions()).await
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("identity", &self.identity)
            .field("tools", &self.tools)
            .field("termination", &self.termination)
            .finish_non_exhaustive()
    }
}

// ─── Backends ───────────────────────────────────────────────────────────────

/// OpenAI-compatible chat completion backend.
#[derive(Clone)]
pub struct LlmChatModel {
    client: Arc<LlmClient>,
    model: String,
    temperature: Option<f64>,
}

impl LlmChatModel {
    pub fn new(client: Arc<LlmClient>, model: &str, temperature: Option<f64>) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }

    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        let client = LlmClient::from_config(cfg)?;
        Ok(Self::new(Arc::new(client), &cfg.model, cfg.temperature))
    }
}

#[async_trait]
impl ChatModel for LlmChatModel {
    async fn respond(&self, messages: &[ChatMessage], tools: &[ToolDefinition]) -> Result<AgentReply> {
        let tools = (!tools.is_empty()).then_some(tools);
        let resp = self
            .client
            .chat_completion(&self.model, messages, tools, self.temperature)
            .await?;
        let Some(msg) = resp.first_message() else {
            anyhow::bail!("LLM returned no choices");
        };
        Ok(AgentReply {
            content: msg.content.clone(),
            tool_calls: msg.tool_calls.clone().unwrap_or_default(),
        })
    }
}

/// Backend that always replies with empty text. Stands in for a human
/// participant that never types anything after the opening message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentModel;

#[async_trait]
impl ChatModel for SilentModel {
    async fn respond(&self, _messages: &[ChatMessage], _tools: &[ToolDefinition]) -> Result<AgentReply> {
        Ok(AgentReply::text(""))
    }
}

/// Backend replaying canned replies in order. Records every request it sees.
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<AgentReply>>>,
    seen: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = AgentReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every message list passed to `respond`, oldest first.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn respond(&self, messages: &[ChatMessage], _tools: &[ToolDefinition]) -> Result<AgentReply> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(messages.to_vec());
        }
        let next = self
            .replies
            .lock()
            .map_err(|_| anyhow::anyhow!("script lock poisoned"))?
            .pop_front();
        next.ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}
