//! `kassist news`: fetch the configured pages and search them.

use anyhow::Result;

use kassist_core::config::NewsConfig;
use kassist_news::{fetch_all_news, search_news, HttpPageSource, NewsItem, NewsQuery, NewsRow};

use super::{print_json, runtime};

#[derive(Debug, Default)]
pub struct NewsOptions {
    pub query: Option<String>,
    pub columns: Vec<String>,
    pub sections: Vec<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub list: Option<String>,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
    pub limit: Option<usize>,
}

impl NewsOptions {
    fn apply(&self, cfg: &mut NewsConfig) {
        if let Some(list) = &self.list {
            cfg.section = list.clone();
        }
        if let Some(p) = self.start_page {
            cfg.start_page = p;
        }
        if let Some(p) = self.end_page {
            cfg.end_page = p;
        }
        if let Some(n) = self.limit {
            cfg.max_results = n;
        }
    }

    fn query(&self, max_results: usize) -> NewsQuery {
        NewsQuery {
            query: self.query.clone().filter(|q| !q.trim().is_empty()),
            search_columns: (!self.columns.is_empty()).then(|| self.columns.clone()),
            sections: (!self.sections.is_empty()).then(|| self.sections.clone()),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            max_results: (max_results > 0).then_some(max_results),
        }
    }
}

pub fn cmd_news(opts: NewsOptions, json: bool) -> Result<()> {
    let mut cfg = NewsConfig::from_env();
    opts.apply(&mut cfg);
    let source = HttpPageSource::from_config(&cfg)?;

    let rt = runtime()?;
    let table = rt.block_on(fetch_all_news(&source, cfg.start_page, cfg.end_page, &cfg.section));
    let hits = search_news(&table, &opts.query(cfg.max_results))?;

    if json {
        return print_json(&hits);
    }
    if hits.is_empty() {
        println!("No matching news found.");
    }
    for row in &hits {
        print_row(row);
    }
    Ok(())
}

fn print_row(row: &NewsRow) {
    match NewsItem::from_row(row) {
        Some(item) => {
            println!("{}  [{}]", item.ar_pubdate, item.ar_section);
            println!("  {}", item.ar_head);
            if !item.ar_desc.trim().is_empty() {
                println!("  {}", item.ar_desc.trim());
            }
            if let Some(url) = item.url {
                println!("  {}", url);
            }
            println!();
        }
        None => println!("{}\n", serde_json::Value::Object(row.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_config() {
        let opts = NewsOptions {
            list: Some("taiwan".into()),
            start_page: Some(2),
            end_page: Some(3),
            limit: Some(0),
            ..NewsOptions::default()
        };
        let mut cfg = NewsConfig::default();
        opts.apply(&mut cfg);
        assert_eq!(cfg.section, "taiwan");
        assert_eq!((cfg.start_page, cfg.end_page), (2, 3));
        assert_eq!(opts.query(cfg.max_results).max_results, None);
    }

    #[test]
    fn test_query_normalises_empty_lists() {
        let opts = NewsOptions {
            query: Some("  ".into()),
            sections: vec!["Taiwan News".into()],
            ..NewsOptions::default()
        };
        let q = opts.query(5);
        assert_eq!(q.query, None);
        assert_eq!(q.search_columns, None);
        assert_eq!(q.sections, Some(vec!["Taiwan News".to_string()]));
        assert_eq!(q.max_results, Some(5));
    }
}
