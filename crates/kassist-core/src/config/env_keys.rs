//! Environment variable keys and their aliases.
//!
//! Primary keys use the `KASSIST_*` prefix; `OPENAI_*` and bare names are
//! accepted as fallbacks.

/// LLM API
pub mod llm {
    pub const API_BASE: &str = "KASSIST_API_BASE";
    pub const API_BASE_ALIASES: &[&str] = &["OPENAI_API_BASE", "OPENAI_BASE_URL", "BASE_URL"];

    pub const API_KEY: &str = "KASSIST_API_KEY";
    pub const API_KEY_ALIASES: &[&str] = &["OPENAI_API_KEY", "OPEN_API_KEY", "API_KEY"];

    pub const MODEL: &str = "KASSIST_MODEL";
    pub const MODEL_ALIASES: &[&str] = &["OPENAI_MODEL", "MODEL"];

    pub const TEMPERATURE: &str = "KASSIST_TEMPERATURE";
    pub const TIMEOUT_SECS: &str = "KASSIST_LLM_TIMEOUT_SECS";
}

/// News API
pub mod news {
    pub const BASE_URL: &str = "KASSIST_NEWS_BASE_URL";
    pub const SECTION: &str = "KASSIST_NEWS_SECTION";
    pub const START_PAGE: &str = "KASSIST_NEWS_START_PAGE";
    pub const END_PAGE: &str = "KASSIST_NEWS_END_PAGE";
    pub const MAX_RESULTS: &str = "KASSIST_NEWS_MAX_RESULTS";
    pub const TIMEOUT_SECS: &str = "KASSIST_NEWS_TIMEOUT_SECS";
}

/// Conversation loop limits and the termination sentinel
pub mod conversation {
    pub const MAX_TURNS: &str = "KASSIST_MAX_TURNS";
    pub const MAX_TOOL_ROUNDS: &str = "KASSIST_MAX_TOOL_ROUNDS";
    pub const SENTINEL: &str = "KASSIST_SENTINEL";
}

/// Session defaults
pub mod session {
    pub const USER_NAME: &str = "KASSIST_USER_NAME";
    pub const LANGUAGE: &str = "KASSIST_LANGUAGE";
}

/// Observability and logging
pub mod observability {
    pub const QUIET: &str = "KASSIST_QUIET";
    pub const LOG_LEVEL: &str = "KASSIST_LOG_LEVEL";
    pub const LOG_JSON: &str = "KASSIST_LOG_JSON";
}
