//! LLM HTTP client for OpenAI-compatible chat completions with tool calling.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use kassist_core::config::LlmConfig;

use crate::types::{ChatMessage, ToolCall};

mod openai;

#[cfg(test)]
mod tests;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct LlmClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        Self::new(&cfg.api_base, &cfg.api_key, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

// ─── Response types ─────────────────────────────────────────────────────────
// id/model/usage/index/finish_reason/role are required for deserialization
// but not read by our code.

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// The first choice's message, if any.
    pub fn first_message(&self) -> Option<&ChoiceMessage> {
        self.choices.first().map(|c| &c.message)
    }
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: String,
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Build the request body for a chat completion.
pub(crate) fn request_body(
    model: &str,
    messages: &[ChatMessage],
    tools: Option<&[crate::types::ToolDefinition]>,
    temperature: Option<f64>,
) -> Result<serde_json::Value> {
    let mut body = serde_json::json!({
        "model": model,
        "messages": messages,
    });
    if let Some(temp) = temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    if let Some(tools) = tools {
        if !tools.is_empty() {
            body["tools"] = serde_json::to_value(tools)?;
        }
    }
    Ok(body)
}
