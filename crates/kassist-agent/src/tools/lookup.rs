//! List-accepting wrappers over the single-value catalog lookups.
//!
//! Each list element is searched on its own (other list dimensions unset,
//! scalar filters passed through) and the hits are unioned, keeping the
//! first occurrence of every natural key.

use std::collections::HashSet;

use crate::catalog::{
    search_expert, search_textbook, Expert, ExpertFilter, LookupResult, Record, Textbook,
    TextbookFilter,
};

use super::request::{ExpertArgs, TextbookArgs};

pub fn search_by_expert(args: &ExpertArgs) -> LookupResult<Expert> {
    let name = args.name.as_deref();
    let disciplines = list(&args.discipline);
    let interests = list(&args.interest);

    if disciplines.is_empty() && interests.is_empty() {
        return search_expert(&ExpertFilter {
            name,
            ..Default::default()
        });
    }

    let mut batches = Vec::new();
    for d in disciplines {
        batches.push(search_expert(&ExpertFilter {
            name,
            discipline: Some(d),
            interest: None,
        }));
    }
    for i in interests {
        batches.push(search_expert(&ExpertFilter {
            name,
            discipline: None,
            interest: Some(i),
        }));
    }
    union_unique(batches)
}

pub fn search_by_textbook(args: &TextbookArgs) -> LookupResult<Textbook> {
    let title = args.title.as_deref();
    let disciplines = list(&args.discipline);
    let experts = list(&args.related_expert);

    if disciplines.is_empty() && experts.is_empty() {
        return search_textbook(&TextbookFilter {
            title,
            ..Default::default()
        });
    }

    let mut batches = Vec::new();
    for d in disciplines {
        batches.push(search_textbook(&TextbookFilter {
            title,
            discipline: Some(d),
            related_expert: None,
        }));
    }
    for e in experts {
        batches.push(search_textbook(&TextbookFilter {
            title,
            discipline: None,
            related_expert: Some(e),
        }));
    }
    union_unique(batches)
}

fn list(values: &Option<Vec<String>>) -> Vec<&str> {
    values
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Concatenate batches, dropping repeated keys. `NoMatch` batches add nothing.
fn union_unique<T: Record>(batches: Vec<LookupResult<T>>) -> LookupResult<T> {
    let mut seen: HashSet<&'static str> = HashSet::new();
    let mut out: Vec<&'static T> = Vec::new();
    for batch in &batches {
        for &record in batch.records() {
            if seen.insert(record.key()) {
                out.push(record);
            }
        }
    }
    LookupResult::from_hits(out)
}
