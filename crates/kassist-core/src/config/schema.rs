//! Configuration structs grouped by concern, loaded from the environment.

use super::env_keys::{conversation as conv_keys, llm, news, observability as obv_keys, session};
use super::loader::{env_bool, env_optional, env_or, env_parse, load_dotenv};

/// LLM API configuration (OpenAI-compatible endpoint).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f64>,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// Load from the environment (reads `.env` first).
    pub fn from_env() -> Self {
        load_dotenv();
        let defaults = Self::default();
        Self {
            api_base: env_or(llm::API_BASE, llm::API_BASE_ALIASES, || defaults.api_base.clone()),
            api_key: env_or(llm::API_KEY, llm::API_KEY_ALIASES, String::new),
            model: env_or(llm::MODEL, llm::MODEL_ALIASES, || defaults.model.clone()),
            temperature: env_optional(llm::TEMPERATURE, &[]).and_then(|s| s.parse().ok()),
            timeout_secs: env_parse(llm::TIMEOUT_SECS, defaults.timeout_secs),
        }
    }

    /// `None` when no API key is configured.
    pub fn try_from_env() -> Option<Self> {
        let cfg = Self::from_env();
        if cfg.api_key.trim().is_empty() || cfg.api_base.trim().is_empty() {
            None
        } else {
            Some(cfg)
        }
    }
}

/// News API configuration.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub base_url: String,
    /// `all` or a section slug such as `front`, `taiwan`.
    pub section: String,
    pub start_page: u32,
    pub end_page: u32,
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.taipeitimes.com/ajax_json".to_string(),
            section: "all".to_string(),
            start_page: 1,
            end_page: 5,
            max_results: 5,
            timeout_secs: 15,
        }
    }
}

impl NewsConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        let d = Self::default();
        Self {
            base_url: env_or(news::BASE_URL, &[], || d.base_url.clone()),
            section: env_or(news::SECTION, &[], || d.section.clone()),
            start_page: env_parse(news::START_PAGE, d.start_page),
            end_page: env_parse(news::END_PAGE, d.end_page),
            max_results: env_parse(news::MAX_RESULTS, d.max_results),
            timeout_secs: env_parse(news::TIMEOUT_SECS, d.timeout_secs),
        }
    }
}

/// Conversation loop limits.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Non-tool turn budget, the initiating message included.
    pub max_turns: usize,
    /// Consecutive tool rounds one agent may spend inside a single step.
    pub max_tool_rounds: usize,
    /// Marker whose presence in a turn ends the conversation.
    pub sentinel: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: 4,
            max_tool_rounds: 5,
            sentinel: "ALL DONE".to_string(),
        }
    }
}

impl ConversationConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        let d = Self::default();
        Self {
            max_turns: env_parse(conv_keys::MAX_TURNS, d.max_turns),
            max_tool_rounds: env_parse(conv_keys::MAX_TOOL_ROUNDS, d.max_tool_rounds),
            sentinel: env_or(conv_keys::SENTINEL, &[], || d.sentinel.clone()),
        }
    }
}

/// Per-user session defaults.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_name: String,
    pub language: String,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        Self {
            user_name: env_or(session::USER_NAME, &[], || "Gild".to_string()),
            language: env_or(session::LANGUAGE, &[], || "English".to_string()),
        }
    }
}

/// Default filter: our crates at INFO, dependencies at WARN.
pub const DEFAULT_LOG_LEVEL: &str = "warn,kassist=info,kassist_agent=info,kassist_news=info";

/// Observability: quiet mode, log level, JSON output.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            load_dotenv();
            Self {
                quiet: env_bool(obv_keys::QUIET, &[], false),
                log_level: env_or(obv_keys::LOG_LEVEL, &[], || DEFAULT_LOG_LEVEL.to_string()),
                log_json: env_bool(obv_keys::LOG_JSON, &[], false),
            }
        })
    }
}
