//! Two-agent conversation loop.
//!
//! The initiating message is turn 1. Agents then alternate, the responder
//! first. A reply that asks for tools is recorded, the tools run, their
//! results are recorded, and the same agent is asked again; none of that
//! consumes the turn budget. Any other reply is recorded and both agents'
//! termination rules are checked before the other agent speaks.

mod agent;
mod termination;
mod view;

#[cfg(test)]
mod tests;

use kassist_core::config::ConversationConfig;
use thiserror::Error;

use crate::tools::ToolRegistry;
use crate::transcript::{Transcript, Turn};
use crate::types::EventSink;

pub use agent::{Agent, AgentReply, ChatModel, LlmChatModel, ScriptedModel, SilentModel};
pub use termination::TerminationRule;
pub use view::agent_view;

/// Failures that end a conversation.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("{agent} kept requesting tools for {limit} rounds without answering")]
    ToolLoopExceeded { agent: String, limit: usize },

    #[error("{agent} failed to respond: {source}")]
    Model {
        agent: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `by`'s termination rule matched the last turn.
    Terminated { by: String },
    /// The turn budget was used up.
    TurnBudget,
}

/// Result of a finished conversation.
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    pub transcript: Transcript,
    pub stop: StopReason,
    pub tool_calls: usize,
    pub failed_tool_calls: usize,
}

/// Loop limits plus the tools agents may call.
pub struct Conversation<'a> {
    registry: &'a ToolRegistry,
    max_turns: usize,
    max_tool_rounds: usize,
}

impl<'a> Conversation<'a> {
    pub fn new(registry: &'a ToolRegistry, limits: &ConversationConfig) -> Self {
        Self {
            registry,
            max_turns: limits.max_turns,
            max_tool_rounds: limits.max_tool_rounds,
        }
    }

    #[must_use]
    pub fn max_turns(mut self, n: usize) -> Self {
        self.max_turns = n;
        self
    }

    #[must_use]
    pub fn max_tool_rounds(mut self, n: usize) -> Self {
        self.max_tool_rounds = n;
        self
    }

    /// Run until a termination rule matches or `max_turns` non-tool turns
    /// (the opening included) exist. A budget of 0 is treated as 1.
    pub async fn run(
        &self,
        initiator: &Agent,
        responder: &Agent,
        opening: &str,
        sink: &mut dyn EventSink,
    ) -> Result<ConversationOutcome, ConversationError> {
        let budget = self.max_turns.max(1);
        let mut transcript = Transcript::new();
        let mut tool_calls = 0usize;
        let mut failed_tool_calls = 0usize;

        tracing::info!(
            initiator = initiator.identity(),
            responder = responder.identity(),
            max_turns = budget,
            "conversation started"
        );

        transcript.push(Turn::opening(initiator.identity(), opening));
        sink.on_text(initiator.identity(), opening);

        // `speaker` answers next; `listener` produced the latest turn.
        let (mut speaker, mut listener) = (responder, initiator);
        loop {
            if let Some(by) = terminated_by(&transcript, speaker, listener) {
                tracing::info!(by = %by, turns = transcript.len(), "conversation terminated");
                return Ok(ConversationOutcome {
                    transcript,
                    stop: StopReason::Terminated { by },
                    tool_calls,
                    failed_tool_calls,
                });
            }
            if transcript.non_tool_turns() >= budget {
                tracing::info!(turns = transcript.len(), "turn budget reached");
                return Ok(ConversationOutcome {
                    transcript,
                    stop: StopReason::TurnBudget,
                    tool_calls,
                    failed_tool_calls,
                });
            }

            let mut rounds = 0usize;
            loop {
                let messages = agent_view(&transcript, speaker.identity(), speaker.persona());
                let reply = speaker
                    .respond(&messages)
                    .await
                    .map_err(|e| ConversationError::Model {
                        agent: speaker.identity().to_string(),
                        source: e.into(),
                    })?;
                let content = reply.content.clone().unwrap_or_default();

                if !reply.wants_tools() {
                    tracing::debug!(agent = speaker.identity(), chars = content.len(), "turn appended");
                    transcript.push(Turn::reply(speaker.identity(), &content));
                    sink.on_text(speaker.identity(), &content);
                    break;
                }

                transcript.push(Turn::tool_request(
                    speaker.identity(),
                    &content,
                    reply.tool_calls.clone(),
                ));
                for call in &reply.tool_calls {
                    tool_calls += 1;
                    sink.on_tool_call(speaker.identity(), &call.function.name, &call.function.arguments);
                    let result = self.registry.invoke(call, speaker.tools(), speaker.identity()).await;
                    if result.is_error {
                        failed_tool_calls += 1;
                    }
                    sink.on_tool_result(&result.tool_name, &result.content, result.is_error);
                    transcript.push(Turn::tool_result(speaker.identity(), &result));
                }

                rounds += 1;
                if rounds >= self.max_tool_rounds.max(1) {
                    tracing::warn!(
                        agent = speaker.identity(),
                        limit = self.max_tool_rounds,
                        "tool loop exceeded"
                    );
                    return Err(ConversationError::ToolLoopExceeded {
                        agent: speaker.identity().to_string(),
                        limit: self.max_tool_rounds,
                    });
                }
            }

            std::mem::swap(&mut speaker, &mut listener);
        }
    }
}

/// Identity of the first agent whose rule matches the latest turn: the one
/// it was addressed to, then its author.
fn terminated_by(transcript: &Transcript, addressee: &Agent, author: &Agent) -> Option<String> {
    [addressee, author]
        .into_iter()
        .find(|a| a.termination().is_met(a.identity(), transcript))
        .map(|a| a.identity().to_string())
}
