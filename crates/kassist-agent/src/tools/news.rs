//! `search_by_news`: fetch the configured pages, then filter.

use kassist_core::config::NewsConfig;
use kassist_news::{fetch_all_news, search_news, NewsError, NewsQuery, NewsRow, PageSource};

use super::request::NewsArgs;

pub async fn search_by_news(
    source: &dyn PageSource,
    cfg: &NewsConfig,
    args: &NewsArgs,
) -> Result<Vec<NewsRow>, NewsError> {
    let table = fetch_all_news(source, cfg.start_page, cfg.end_page, &cfg.section).await;
    let query = NewsQuery {
        query: args.query.clone().filter(|q| !q.trim().is_empty()),
        search_columns: args.search_columns.clone(),
        sections: args.sections.clone(),
        date_from: args.date_from.clone(),
        date_to: args.date_to.clone(),
        max_results: (cfg.max_results > 0).then_some(cfg.max_results),
    };
    search_news(&table, &query)
}
