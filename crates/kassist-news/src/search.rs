//! Filtering over a fetched news table.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::table::{NewsRow, NewsTable};
use crate::NewsError;

/// Columns every searchable table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["ar_section", "ar_pubdate", "ar_head", "ar_desc"];

/// Columns matched by `query` when none are given.
pub const DEFAULT_SEARCH_COLUMNS: [&str; 2] = ["ar_head", "ar_desc"];

const DEFAULT_MAX_RESULTS: usize = 5;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Search parameters. `None` skips the corresponding filter.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub query: Option<String>,
    pub search_columns: Option<Vec<String>>,
    pub sections: Option<Vec<String>>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// `None` returns every match.
    pub max_results: Option<usize>,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            query: None,
            search_columns: None,
            sections: None,
            date_from: None,
            date_to: None,
            max_results: Some(DEFAULT_MAX_RESULTS),
        }
    }
}

impl NewsQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

/// Filter `table` by `q`. Filters are AND-combined; output keeps table order.
///
/// Errors with [`NewsError::EmptyCorpus`] on an empty table and
/// [`NewsError::Schema`] when required or requested search columns are absent.
/// Malformed dates never error: they simply match nothing.
pub fn search_news(table: &NewsTable, q: &NewsQuery) -> Result<Vec<NewsRow>, NewsError> {
    if table.is_empty() {
        return Err(NewsError::EmptyCorpus);
    }

    let search_columns: Vec<&str> = match &q.search_columns {
        Some(cols) => cols.iter().map(String::as_str).collect(),
        None => DEFAULT_SEARCH_COLUMNS.to_vec(),
    };

    let columns = table.columns();
    let mut missing: Vec<String> = Vec::new();
    for col in REQUIRED_COLUMNS.iter().chain(search_columns.iter()) {
        if !columns.contains(col) && !missing.iter().any(|m| m == col) {
            missing.push(col.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(NewsError::Schema { missing });
    }

    let needle = q.query.as_deref().map(str::to_lowercase);
    let from = q.date_from.as_deref().map(|s| parse_bound(s, false));
    let to = q.date_to.as_deref().map(|s| parse_bound(s, true));

    let limit = q.max_results.unwrap_or(usize::MAX);
    let hits: Vec<NewsRow> = table
        .rows()
        .iter()
        .filter(|row| match &needle {
            Some(n) => search_columns.iter().any(|c| cell_contains(row.get(*c), n)),
            None => true,
        })
        .filter(|row| match &q.sections {
            Some(sections) => row
                .get("ar_section")
                .and_then(Value::as_str)
                .map(|s| sections.iter().any(|want| want == s))
                .unwrap_or(false),
            None => true,
        })
        .filter(|row| {
            if from.is_none() && to.is_none() {
                return true;
            }
            let Some(date) = row
                .get("ar_pubdate")
                .and_then(Value::as_str)
                .and_then(parse_datetime)
            else {
                return false;
            };
            let after_from = match from {
                Some(Some(f)) => date >= f,
                Some(None) => false,
                None => true,
            };
            let before_to = match to {
                Some(Some(t)) => date <= t,
                Some(None) => false,
                None => true,
            };
            after_from && before_to
        })
        .take(limit)
        .cloned()
        .collect();

    tracing::debug!(
        query = q.query.as_deref().unwrap_or(""),
        hits = hits.len(),
        "news search"
    );
    Ok(hits)
}

fn cell_contains(cell: Option<&Value>, needle_lower: &str) -> bool {
    match cell {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => s.to_lowercase().contains(needle_lower),
        Some(other) => other.to_string().to_lowercase().contains(needle_lower),
    }
}

/// Parse a row date or timestamp. Date-only values become midnight.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| parse_date(raw).map(|d| d.and_time(NaiveTime::MIN)))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
}

/// A date-only upper bound covers the whole day.
fn parse_bound(raw: &str, upper: bool) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if upper {
        if let Some(d) = parse_date(raw) {
            return d.and_hms_opt(23, 59, 59);
        }
    }
    parse_datetime(raw)
}
