//! Paginated news retrieval.
//!
//! Pages are fetched one after another. A page that fails (transport,
//! status, or payload) is logged and skipped so a single bad page never
//! empties the whole result.

use std::time::Duration;

use async_trait::async_trait;
use kassist_core::config::NewsConfig;

use crate::table::NewsTable;
use crate::NewsError;

/// Source of one page of news.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32, section: &str) -> Result<NewsTable, NewsError>;
}

/// HTTP page source against the JSON list endpoint.
pub struct HttpPageSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NewsError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &NewsConfig) -> Result<Self, NewsError> {
        Self::new(&cfg.base_url, Duration::from_secs(cfg.timeout_secs))
    }

    /// `{base}/{page}/list/` for `all`, `{base}/{page}/list/{section}/` otherwise.
    pub fn page_url(&self, page: u32, section: &str) -> String {
        let section = section.trim().trim_matches('/');
        if section.is_empty() || section.eq_ignore_ascii_case("all") {
            format!("{}/{}/list/", self.base_url, page)
        } else {
            format!("{}/{}/list/{}/", self.base_url, page, section)
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32, section: &str) -> Result<NewsTable, NewsError> {
        let url = self.page_url(page, section);
        tracing::debug!(%url, "fetching news page");

        let fetch_err = |reason: String| NewsError::Fetch { page, reason };

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {}", status)));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| fetch_err(format!("invalid JSON: {}", e)))?;

        NewsTable::from_payload(payload)
    }
}

/// Fetch pages `start..=end` of a section and merge them.
///
/// Failed pages are skipped with a warning. If the merged table carries
/// `ar_id`, rows are sorted by it descending and repeated ids dropped.
/// Returns an empty table when every page fails or `start > end`.
pub async fn fetch_all_news(
    source: &dyn PageSource,
    start_page: u32,
    end_page: u32,
    section: &str,
) -> NewsTable {
    let mut pages = Vec::new();
    for page in start_page..=end_page {
        match source.fetch_page(page, section).await {
            Ok(table) => {
                tracing::debug!(page, rows = table.len(), "news page fetched");
                pages.push(table);
            }
            Err(e) => {
                tracing::warn!(page, section, error = %e, "skipping news page");
            }
        }
    }

    let mut merged = NewsTable::concat(pages);
    merged.sort_and_dedup_by_id();
    tracing::info!(
        section,
        start_page,
        end_page,
        rows = merged.len(),
        "news fetched"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory pages; pages not in the map fail.
    struct FakeSource {
        pages: HashMap<u32, serde_json::Value>,
        requested: Mutex<Vec<(u32, String)>>,
    }

    impl FakeSource {
        fn new(pages: Vec<(u32, serde_json::Value)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn fetch_page(&self, page: u32, section: &str) -> Result<NewsTable, NewsError> {
            self.requested
                .lock()
                .unwrap()
                .push((page, section.to_string()));
            match self.pages.get(&page) {
                Some(v) => NewsTable::from_payload(v.clone()),
                None => Err(NewsError::Fetch {
                    page,
                    reason: "HTTP 503 Service Unavailable".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_page_url() {
        let src = HttpPageSource::new("https://news.example/ajax_json/", Duration::from_secs(1)).unwrap();
        assert_eq!(src.page_url(1, "all"), "https://news.example/ajax_json/1/list/");
        assert_eq!(src.page_url(3, "taiwan"), "https://news.example/ajax_json/3/list/taiwan/");
    }

    #[tokio::test]
    async fn test_fetch_all_skips_failing_page() {
        let source = FakeSource::new(vec![
            (1, json!([{"ar_id": 5, "ar_head": "five"}, {"ar_id": 4, "ar_head": "four"}])),
            // page 2 missing -> error
            (3, json!([{"ar_id": 4, "ar_head": "four again"}, {"ar_id": 9, "ar_head": "nine"}])),
        ]);

        let table = fetch_all_news(&source, 1, 3, "front").await;

        let heads: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r["ar_head"].as_str().unwrap())
            .collect();
        assert_eq!(heads, vec!["nine", "five", "four"]);
        let requested = source.requested.lock().unwrap();
        assert_eq!(requested.len(), 3);
        assert!(requested.iter().all(|(_, s)| s == "front"));
    }

    #[tokio::test]
    async fn test_fetch_all_every_page_fails() {
        let source = FakeSource::new(vec![]);
        let table = fetch_all_news(&source, 1, 2, "all").await;
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_inverted_range() {
        let source = FakeSource::new(vec![(1, json!([{"ar_id": 1}]))]);
        let table = fetch_all_news(&source, 2, 1, "all").await;
        assert!(table.is_empty());
        assert!(source.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_without_id_keeps_page_order() {
        let source = FakeSource::new(vec![
            (1, json!([{"ar_head": "a"}])),
            (2, json!({"ar_head": {"0": "b", "1": "c"}})),
        ]);
        let table = fetch_all_news(&source, 1, 2, "all").await;
        let heads: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r["ar_head"].as_str().unwrap())
            .collect();
        assert_eq!(heads, vec!["a", "b", "c"]);
    }
}
