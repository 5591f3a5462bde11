use thiserror::Error;

/// Errors raised by the news fetcher and searcher.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("News table is empty; fetch news first")]
    EmptyCorpus,

    #[error("Columns missing from news table: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Failed to fetch page {page}: {reason}")]
    Fetch { page: u32, reason: String },

    #[error("Malformed news payload: {0}")]
    Payload(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
