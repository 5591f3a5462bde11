//! K-Assistant agent layer.
//!
//! - `conversation`: two-agent loop with tool calls and termination rules
//! - `tools`:        tool definitions, typed requests, dispatch
//! - `catalog`:      static expert and textbook tables
//! - `llm`:          OpenAI-compatible chat completion client
//! - `personas`:     ready-made agent pairs; `prompt`: persona text and templates
//! - `session`:      caller-owned context and transcript rendering

pub mod catalog;
pub mod conversation;
pub mod llm;
pub mod personas;
pub mod prompt;
pub mod session;
pub mod tools;
pub mod transcript;
pub mod types;

pub use conversation::{
    Agent, AgentReply, ChatModel, Conversation, ConversationError, ConversationOutcome,
    LlmChatModel, ScriptedModel, SilentModel, StopReason, TerminationRule,
};
pub use session::{render_transcript, ConversationContext, DisplayMessage};
pub use tools::{ToolBindings, ToolInvocationError, ToolKind, ToolRegistry, ToolRequest};
pub use transcript::{Role, Transcript, Turn, TurnAttachment};
pub use types::{EventSink, NullSink};
