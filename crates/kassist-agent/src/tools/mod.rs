//! Tool functions callable by agents.
//!
//! - `request`: typed `ToolRequest` parsed and validated from a tool call
//! - `lookup`:  `search_by_expert`, `search_by_textbook` (list fan-out + dedup)
//! - `news`:    `search_by_news` (fetch configured pages, then search)
//! - `time`:    `get_time`
//!
//! `ToolRegistry` owns what tools need at run time (news source and settings)
//! and turns every tool call into a `ToolResult`; failures become error
//! results instead of aborting the conversation.

mod lookup;
mod news;
mod request;
mod time;


use std::collections::BTreeSet;

use serde_json::json;
use thiserror::Error;

use kassist_core::config::NewsConfig;
use kassist_news::{HttpPageSource, NewsError, PageSource};

use crate::types::{FunctionDef, ToolCall, ToolDefinition, ToolResult};

pub use lookup::{search_by_expert, search_by_textbook};
pub use request::{ExpertArgs, NewsArgs, TextbookArgs, ToolRequest};
pub use time::{get_time, FALLBACK_TIME};

/// Errors raised while turning a tool call into a result.
#[derive(Debug, Error)]
pub enum ToolInvocationError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{tool}' is not available to {agent}")]
    NotBound { tool: String, agent: String },

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("{tool} failed: {reason}")]
    Execution { tool: String, reason: String },
}

/// The tools an agent may be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolKind {
    SearchByExpert,
    SearchByTextbook,
    SearchByNews,
    GetTime,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::SearchByExpert,
        ToolKind::SearchByTextbook,
        ToolKind::SearchByNews,
        ToolKind::GetTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SearchByExpert => "search_by_expert",
            Self::SearchByTextbook => "search_by_textbook",
            Self::SearchByNews => "search_by_news",
            Self::GetTime => "get_time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name.trim())
    }

    /// OpenAI function definition for this tool.
    pub fn definition(self) -> ToolDefinition {
        let (description, parameters) = match self {
            Self::SearchByExpert => (
                "Look up experts by name, discipline or research interest. Each discipline and interest in the lists is searched separately and the matches are merged without duplicates.",
                json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "Expert name."},
                        "discipline": {
                            "type": "array", "items": {"type": "string"},
                            "description": "List of input strings containing disciplines to filter by."
                        },
                        "interest": {
                            "type": "array", "items": {"type": "string"},
                            "description": "List of input strings containing interests to filter by."
                        }
                    },
                    "required": []
                }),
            ),
            Self::SearchByTextbook => (
                "Look up textbooks by title, discipline or related expert. Each list entry is searched separately and the matches are merged without duplicates.",
                json!({
                    "type": "object",
                    "properties": {
                        "title": {"type": "string", "description": "Textbook title."},
                        "discipline": {
                            "type": "array", "items": {"type": "string"},
                            "description": "List of input strings containing disciplines to filter by."
                        },
                        "related_expert": {
                            "type": "array", "items": {"type": "string"},
                            "description": "List of input strings containing related expert names to filter by."
                        }
                    },
                    "required": []
                }),
            ),
            Self::SearchByNews => (
                "Search recent Taipei Times news. All filters are optional and combine with AND.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Keyword or phrase to search for; if omitted and no other filters, returns the latest rows."
                        },
                        "search_columns": {
                            "type": "array", "items": {"type": "string", "enum": ["ar_head", "ar_desc"]},
                            "description": "Which text fields to search: any subset of ['ar_head','ar_desc']."
                        },
                        "sections": {
                            "type": "array", "items": {"type": "string"},
                            "description": "Filter by ar_section values, e.g. ['Taiwan News', 'World News', 'Sports', 'Front Page', 'Features', 'Editorials', 'Business', 'Bilingual Pages']."
                        },
                        "date_from": {"type": "string", "description": "Start date inclusive, 'YYYY-MM-DD'."},
                        "date_to": {"type": "string", "description": "End date inclusive, 'YYYY-MM-DD'."}
                    },
                    "required": []
                }),
            ),
            Self::GetTime => (
                "Get the current local date and time.",
                json!({"type": "object", "properties": {}, "required": []}),
            ),
        };
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDef {
                name: self.name().to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

/// The set of tools bound to one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolBindings {
    kinds: BTreeSet<ToolKind>,
}

impl ToolBindings {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            kinds: ToolKind::ALL.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, kind: ToolKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn contains(&self, kind: ToolKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Definitions advertised to the model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.kinds().map(ToolKind::definition).collect()
    }
}

impl FromIterator<ToolKind> for ToolBindings {
    fn from_iter<I: IntoIterator<Item = ToolKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

/// Executes tool calls.
pub struct ToolRegistry {
    news: NewsConfig,
    source: Box<dyn PageSource>,
}

impl ToolRegistry {
    pub fn new(news: NewsConfig, source: Box<dyn PageSource>) -> Self {
        Self { news, source }
    }

    /// Registry backed by the HTTP news API.
    pub fn from_config(news: NewsConfig) -> Result<Self, NewsError> {
        let source = HttpPageSource::from_config(&news)?;
        Ok(Self::new(news, Box::new(source)))
    }

    pub fn news_config(&self) -> &NewsConfig {
        &self.news
    }

    /// Run a validated request; the result is the text handed back to the model.
    pub async fn execute(&self, request: &ToolRequest) -> Result<String, ToolInvocationError> {
        let tool = request.kind().name();
        match request {
            ToolRequest::SearchByExpert(args) => to_json(tool, &search_by_expert(args)),
            ToolRequest::SearchByTextbook(args) => to_json(tool, &search_by_textbook(args)),
            ToolRequest::SearchByNews(args) => {
                let rows = news::search_by_news(self.source.as_ref(), &self.news, args)
                    .await
                    .map_err(|e| ToolInvocationError::Execution {
                        tool: tool.to_string(),
                        reason: e.to_string(),
                    })?;
                to_json(tool, &rows)
            }
            ToolRequest::GetTime => Ok(get_time()),
        }
    }

    /// Parse, check bindings, execute. Never fails: errors become error results.
    pub async fn invoke(&self, call: &ToolCall, bindings: &ToolBindings, agent: &str) -> ToolResult {
        let name = call.function.name.as_str();
        let outcome = match ToolRequest::parse(name, &call.function.arguments) {
            Ok(request) if !bindings.contains(request.kind()) => Err(ToolInvocationError::NotBound {
                tool: name.to_string(),
                agent: agent.to_string(),
            }),
            Ok(request) => self.execute(&request).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(content) => {
                tracing::debug!(tool = name, agent, bytes = content.len(), "tool succeeded");
                ToolResult {
                    tool_call_id: call.id.clone(),
                    tool_name: name.to_string(),
                    content,
                    is_error: false,
                }
            }
            Err(e) => {
                tracing::warn!(tool = name, agent, error = %e, "tool call failed");
                ToolResult {
                    tool_call_id: call.id.clone(),
                    tool_name: name.to_string(),
                    content: format!("Error: {}", e),
                    is_error: true,
                }
            }
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(tool: &str, value: &T) -> Result<String, ToolInvocationError> {
    serde_json::to_string(value).map_err(|e| ToolInvocationError::Execution {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
