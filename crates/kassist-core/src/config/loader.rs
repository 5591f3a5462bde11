//! Environment variable loading helpers.
//!
//! Keeps the fallback chains in one place so callers never repeat `or_else`.

use std::env;
use std::path::Path;
use std::str::FromStr;

/// Load `.env` from the current directory into the process environment.
/// Existing variables are never overridden. Runs once per process.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let dir = env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        let loaded = load_dotenv_from_dir(&dir);
        if loaded > 0 {
            tracing::debug!("Loaded {} variables from {}", loaded, dir.join(".env").display());
        }
    });
}

/// Load `<dir>/.env` without overriding existing variables.
/// Returns the number of variables that were set.
pub fn load_dotenv_from_dir(dir: &Path) -> usize {
    let content = match std::fs::read_to_string(dir.join(".env")) {
        Ok(c) => c,
        Err(_) => return 0,
    };
    let mut loaded = 0;
    for (key, value) in parse_dotenv(&content) {
        if env::var(key).is_err() {
            env::set_var(key, value);
            loaded += 1;
        }
    }
    loaded
}

/// Parse `KEY=VALUE` lines. Skips blanks and `#` comments, strips one pair of
/// surrounding quotes and unquoted inline comments.
fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            pairs.push((key, value));
        }
    }
    pairs
}

/// Read the primary variable or the first set alias; empty values fall back to `default`.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Like [`env_or`] but returns `None` when unset or blank.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// Boolean variable: `0/false/no/off` are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    match v.as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

/// Parsed variable; unparseable values are logged and replaced by `default`.
pub fn env_parse<T: FromStr>(primary: &str, default: T) -> T {
    match env_optional(primary, &[]) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring invalid value for {}: {:?}", primary, raw);
                default
            }
        },
        None => default,
    }
}
