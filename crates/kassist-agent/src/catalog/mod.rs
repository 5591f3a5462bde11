//! Static lookup tables: experts and textbooks.
//!
//! Tables are built at compile time and never change. A single-value search
//! matches a record when any supplied filter is a case-insensitive substring
//! of the corresponding field; with no filter supplied nothing matches.

mod experts;
mod textbooks;

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

pub use experts::{search_expert, Expert, ExpertFilter, EXPERTS};
pub use textbooks::{search_textbook, Textbook, TextbookFilter, TEXTBOOKS};

/// A lookup-table record with a natural unique key.
pub trait Record: Serialize + Sync + 'static {
    /// Message reported when a lookup finds nothing.
    const NO_MATCH: &'static str;

    /// Natural key (email for experts, title for textbooks).
    fn key(&self) -> &str;
}

/// Outcome of a lookup. Serialises to the list of records, or to
/// `[{"error": "<no match message>"}]` when nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<T: Record> {
    Found(Vec<&'static T>),
    NoMatch,
}

impl<T: Record> LookupResult<T> {
    pub fn from_hits(hits: Vec<&'static T>) -> Self {
        if hits.is_empty() {
            Self::NoMatch
        } else {
            Self::Found(hits)
        }
    }

    /// Matched records; empty for `NoMatch`.
    pub fn records(&self) -> &[&'static T] {
        match self {
            Self::Found(hits) => hits,
            Self::NoMatch => &[],
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }
}

impl<T: Record> Serialize for LookupResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(hits) => {
                let mut seq = serializer.serialize_seq(Some(hits.len()))?;
                for hit in hits {
                    seq.serialize_element(hit)?;
                }
                seq.end()
            }
            Self::NoMatch => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&serde_json::json!({ "error": T::NO_MATCH }))?;
                seq.end()
            }
        }
    }
}

/// Case-insensitive containment of an optional filter in a field.
/// An absent or blank filter never matches.
pub(crate) fn field_matches(filter: Option<&str>, field: &str) -> bool {
    match filter.map(str::trim) {
        Some(f) if !f.is_empty() => field.to_lowercase().contains(&f.to_lowercase()),
        _ => false,
    }
}
