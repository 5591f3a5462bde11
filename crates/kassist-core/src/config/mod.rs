//! Unified configuration layer.
//!
//! Every environment read goes through this module; the rest of the workspace
//! only sees the typed structs in [`schema`].
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool`, `env_parse`, `.env` loading
//! - `schema`: `LlmConfig`, `NewsConfig`, `ConversationConfig`, `SessionConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants and their aliases

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, env_parse, load_dotenv, load_dotenv_from_dir};
pub use schema::{ConversationConfig, LlmConfig, NewsConfig, ObservabilityConfig, SessionConfig};
