//! Caller-owned session state and transcript rendering.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kassist_core::config::SessionConfig;

use crate::transcript::{Role, Transcript};

/// A message ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub content: String,
}

/// Displayable messages of a transcript.
///
/// Tool results and tool requests are omitted, as are turns with blank
/// content. The first turn containing `sentinel` ends rendering: the marker
/// is removed and the rest of that turn is shown if anything is left.
pub fn render_transcript(transcript: &Transcript, sentinel: &str) -> Vec<DisplayMessage> {
    let mut out = Vec::new();
    for turn in transcript.turns() {
        if turn.is_tool_traffic() {
            continue;
        }
        let hit = !sentinel.is_empty() && turn.content.contains(sentinel);
        let content = if hit {
            turn.content.replace(sentinel, "")
        } else {
            turn.content.clone()
        };
        let content = content.trim();
        if !content.is_empty() {
            out.push(DisplayMessage {
                role: turn.role,
                speaker: turn.name.clone(),
                content: content.to_string(),
            });
        }
        if hit {
            break;
        }
    }
    out
}

/// Per-user conversation context, owned by the caller and passed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub id: Uuid,
    pub user_name: String,
    pub language: String,
    messages: Vec<DisplayMessage>,
}

impl ConversationContext {
    pub fn new(user_name: &str, language: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.to_string(),
            language: language.to_string(),
            messages: Vec::new(),
        }
    }

    pub fn from_config(cfg: &SessionConfig) -> Self {
        Self::new(&cfg.user_name, &cfg.language)
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    /// Record a message typed by the user.
    pub fn push_user(&mut self, content: &str) {
        self.messages.push(DisplayMessage {
            role: Role::User,
            speaker: Some(self.user_name.clone()),
            content: content.to_string(),
        });
    }

    /// Append the rendered transcript; returns the newly added messages.
    pub fn record(&mut self, transcript: &Transcript, sentinel: &str) -> &[DisplayMessage] {
        let start = self.messages.len();
        self.messages.extend(render_transcript(transcript, sentinel));
        &self.messages[start..]
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
