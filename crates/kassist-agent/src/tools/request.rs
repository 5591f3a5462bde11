//! Typed tool requests parsed from `(tool_name, arguments_json)`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{ToolInvocationError, ToolKind};

/// Arguments of `search_by_expert`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpertArgs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub discipline: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub interest: Option<Vec<String>>,
}

/// Arguments of `search_by_textbook`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextbookArgs {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub discipline: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub related_expert: Option<Vec<String>>,
}

/// Arguments of `search_by_news`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsArgs {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub search_columns: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_opt_list")]
    pub sections: Option<Vec<String>>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    SearchByExpert(ExpertArgs),
    SearchByTextbook(TextbookArgs),
    SearchByNews(NewsArgs),
    GetTime,
}

impl ToolRequest {
    /// Parse a tool call. Empty or `null` arguments mean "no arguments".
    pub fn parse(name: &str, arguments: &str) -> Result<Self, ToolInvocationError> {
        let kind = ToolKind::from_name(name)
            .ok_or_else(|| ToolInvocationError::UnknownTool(name.to_string()))?;

        let raw = arguments.trim();
        let args: Value = if raw.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(raw).map_err(|e| invalid(kind, e))?
        };
        let args = match args {
            Value::Null => Value::Object(Default::default()),
            v @ Value::Object(_) => v,
            other => {
                return Err(ToolInvocationError::InvalidArguments {
                    tool: kind.name().to_string(),
                    reason: format!("expected a JSON object, got {}", other),
                })
            }
        };

        Ok(match kind {
            ToolKind::SearchByExpert => {
                Self::SearchByExpert(serde_json::from_value(args).map_err(|e| invalid(kind, e))?)
            }
            ToolKind::SearchByTextbook => {
                Self::SearchByTextbook(serde_json::from_value(args).map_err(|e| invalid(kind, e))?)
            }
            ToolKind::SearchByNews => {
                Self::SearchByNews(serde_json::from_value(args).map_err(|e| invalid(kind, e))?)
            }
            ToolKind::GetTime => {
                let _: NoArgs = serde_json::from_value(args).map_err(|e| invalid(kind, e))?;
                Self::GetTime
            }
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::SearchByExpert(_) => ToolKind::SearchByExpert,
            Self::SearchByTextbook(_) => ToolKind::SearchByTextbook,
            Self::SearchByNews(_) => ToolKind::SearchByNews,
            Self::GetTime => ToolKind::GetTime,
        }
    }
}

fn invalid(kind: ToolKind, e: serde_json::Error) -> ToolInvocationError {
    ToolInvocationError::InvalidArguments {
        tool: kind.name().to_string(),
        reason: e.to_string(),
    }
}

/// Optional list of strings. Accepts an array, a single string (or a string
/// holding a JSON array), or null. Empty lists become `None`.
fn de_opt_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    let items = match v {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(arr)) => arr
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => match serde_json::from_str::<Vec<String>>(&s) {
            Ok(parsed) => parsed,
            Err(_) => vec![s],
        },
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a string or a list of strings, got {}",
                other
            )))
        }
    };
    Ok(if items.is_empty() { None } else { Some(items) })
}
