//! News retrieval and search.
//!
//! - `table`:  row-oriented news table decoded from API payloads
//! - `fetch`:  paginated retrieval, concatenation, id dedup
//! - `search`: AND-composed filters over a fetched table
//!
//! Per-page failures are skipped and logged; only `search` raises to the caller.

mod error;
pub mod fetch;
pub mod search;
pub mod table;

pub use error::NewsError;
pub use fetch::{fetch_all_news, HttpPageSource, PageSource};
pub use search::{search_news, NewsQuery, DEFAULT_SEARCH_COLUMNS, REQUIRED_COLUMNS};
pub use table::{NewsItem, NewsRow, NewsTable};
