//! Row-oriented news table.
//!
//! Rows keep every field the API returned so that column checks and
//! configurable search columns work on whatever the payload carries.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::NewsError;

/// One news row as returned by the API.
pub type NewsRow = Map<String, Value>;

/// Unique article id column.
pub const ID_COLUMN: &str = "ar_id";

/// Typed view of a news row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_id: Option<Value>,
    pub ar_section: String,
    pub ar_pubdate: String,
    pub ar_head: String,
    pub ar_desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NewsItem {
    /// `None` when a required field is missing or not a string.
    pub fn from_row(row: &NewsRow) -> Option<Self> {
        serde_json::from_value(Value::Object(row.clone())).ok()
    }
}

/// Ordered collection of news rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsTable {
    rows: Vec<NewsRow>,
}

impl NewsTable {
    pub fn new(rows: Vec<NewsRow>) -> Self {
        Self { rows }
    }

    /// Decode an API payload: an array of row objects, or a column-oriented
    /// object (`{column: {index: value}}` or `{column: [values]}`).
    pub fn from_payload(payload: Value) -> Result<Self, NewsError> {
        match payload {
            Value::Array(items) => {
                let mut rows = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Object(row) => rows.push(row),
                        other => {
                            return Err(NewsError::Payload(format!(
                                "row {} is not an object: {}",
                                i, other
                            )))
                        }
                    }
                }
                Ok(Self { rows })
            }
            Value::Object(columns) => Self::from_columns(columns),
            other => Err(NewsError::Payload(format!(
                "expected array or object, got {}",
                type_name(&other)
            ))),
        }
    }

    fn from_columns(columns: Map<String, Value>) -> Result<Self, NewsError> {
        // Row keys in order of first appearance across columns.
        let mut index: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for (name, values) in &columns {
            match values {
                Value::Object(cells) => {
                    for key in cells.keys() {
                        if seen.insert(key.clone()) {
                            index.push(key.clone());
                        }
                    }
                }
                Value::Array(cells) => {
                    for i in 0..cells.len() {
                        let key = i.to_string();
                        if seen.insert(key.clone()) {
                            index.push(key);
                        }
                    }
                }
                other => {
                    return Err(NewsError::Payload(format!(
                        "column '{}' holds a {}, expected object or array",
                        name,
                        type_name(other)
                    )))
                }
            }
        }

        let rows = index
            .iter()
            .map(|key| {
                let mut row = NewsRow::new();
                for (name, values) in &columns {
                    let cell = match values {
                        Value::Object(cells) => cells.get(key),
                        Value::Array(cells) => key.parse::<usize>().ok().and_then(|i| cells.get(i)),
                        _ => None,
                    };
                    if let Some(v) = cell {
                        row.insert(name.clone(), v.clone());
                    }
                }
                row
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[NewsRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<NewsRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of field names over all rows.
    pub fn columns(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|r| r.keys().map(String::as_str))
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.rows.iter().any(|r| r.contains_key(name))
    }

    /// Append all rows of the given tables in order.
    pub fn concat(tables: impl IntoIterator<Item = NewsTable>) -> Self {
        let rows = tables.into_iter().flat_map(|t| t.rows).collect();
        Self { rows }
    }

    /// Stable sort descending by `ar_id`, then drop repeated ids keeping the
    /// first. Rows without an id go last and are never deduplicated.
    /// No-op when the id column is absent.
    pub fn sort_and_dedup_by_id(&mut self) {
        if !self.has_column(ID_COLUMN) {
            return;
        }
        self.rows.sort_by(|a, b| {
            let ka = a.get(ID_COLUMN).and_then(IdKey::from_value);
            let kb = b.get(ID_COLUMN).and_then(IdKey::from_value);
            match (ka, kb) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });

        let mut seen: HashSet<IdKey> = HashSet::new();
        self.rows.retain(|row| match row.get(ID_COLUMN).and_then(IdKey::from_value) {
            Some(key) => seen.insert(key),
            None => true,
        });
    }
}

/// Sort/dedup key for article ids. Numeric ids rank above textual ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum IdKey {
    Text(String),
    Num(i64),
}

impl IdKey {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Number(n) => n
                .as_i64()
                .map(IdKey::Num)
                .or_else(|| Some(IdKey::Text(n.to_string()))),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.parse().map(IdKey::Num).unwrap_or_else(|_| IdKey::Text(s.to_string())))
                }
            }
            _ => None,
        }
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(table: &NewsTable) -> Vec<Value> {
        table
            .rows()
            .iter()
            .map(|r| r.get(ID_COLUMN).cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn test_from_payload_rows() {
        let table = NewsTable::from_payload(json!([
            {"ar_id": 1, "ar_head": "a"},
            {"ar_id": 2, "ar_head": "b", "url": "u"}
        ]))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("url"));
        assert_eq!(
            table.columns().into_iter().collect::<Vec<_>>(),
            vec!["ar_head", "ar_id", "url"]
        );
    }

    #[test]
    fn test_from_payload_columns() {
        let table = NewsTable::from_payload(json!({
            "ar_id": {"0": 10, "1": 11},
            "ar_head": {"0": "first", "1": "second"}
        }))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1]["ar_head"], "second");

        let table = NewsTable::from_payload(json!({"ar_id": [1, 2, 3]})).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_payload_rejects_scalars() {
        assert!(NewsTable::from_payload(json!("nope")).is_err());
        assert!(NewsTable::from_payload(json!({"ar_id": 5})).is_err());
        assert!(NewsTable::from_payload(json!([1, 2])).is_err());
    }

    #[test]
    fn test_sort_and_dedup_keeps_first_occurrence() {
        let mut table = NewsTable::from_payload(json!([
            {"ar_id": 3, "src": "page1"},
            {"ar_id": "10", "src": "page1"},
            {"ar_head": "no id"},
            {"ar_id": 3, "src": "page2"},
            {"ar_id": 7, "src": "page2"}
        ]))
        .unwrap();
        table.sort_and_dedup_by_id();

        assert_eq!(ids(&table), vec![json!("10"), json!(7), json!(3), Value::Null]);
        assert_eq!(table.rows()[2]["src"], "page1");
    }

    #[test]
    fn test_sort_without_id_column_is_noop() {
        let mut table = NewsTable::from_payload(json!([{"x": 2}, {"x": 1}])).unwrap();
        let before = table.clone();
        table.sort_and_dedup_by_id();
        assert_eq!(table, before);
    }

    #[test]
    fn test_news_item_view() {
        let row = json!({
            "ar_id": 1, "ar_section": "Sports", "ar_pubdate": "2025-01-02",
            "ar_head": "h", "ar_desc": "d"
        });
        let item = NewsItem::from_row(row.as_object().unwrap()).unwrap();
        assert_eq!(item.ar_section, "Sports");
        assert!(item.url.is_none());

        let partial = json!({"ar_head": "h"});
        assert!(NewsItem::from_row(partial.as_object().unwrap()).is_none());
    }
}
