//! Offline lookups: `experts`, `textbooks`, `time`.

use anyhow::Result;

use kassist_agent::catalog::{Expert, LookupResult, Record, Textbook};
use kassist_agent::tools::{get_time, search_by_expert, search_by_textbook, ExpertArgs, TextbookArgs};

use super::print_json;

fn non_empty(list: Vec<String>) -> Option<Vec<String>> {
    let list: Vec<String> = list.into_iter().filter(|s| !s.trim().is_empty()).collect();
    (!list.is_empty()).then_some(list)
}

pub fn cmd_experts(
    name: Option<String>,
    disciplines: Vec<String>,
    interests: Vec<String>,
    json: bool,
) -> Result<()> {
    let args = ExpertArgs {
        name,
        discipline: non_empty(disciplines),
        interest: non_empty(interests),
    };
    let result = search_by_expert(&args);
    if json {
        return print_json(&result);
    }
    print_lookup(&result, |e: &Expert| {
        format!(
            "{} <{}>\n  {} · {}\n  interests: {}",
            e.name, e.email, e.url, e.discipline, e.interest
        )
    });
    Ok(())
}

pub fn cmd_textbooks(
    title: Option<String>,
    disciplines: Vec<String>,
    related_experts: Vec<String>,
    json: bool,
) -> Result<()> {
    let args = TextbookArgs {
        title,
        discipline: non_empty(disciplines),
        related_expert: non_empty(related_experts),
    };
    let result = search_by_textbook(&args);
    if json {
        return print_json(&result);
    }
    print_lookup(&result, |t: &Textbook| {
        format!(
            "{} ({})\n  {}\n  {}\n  expert: {}",
            t.title, t.author, t.discipline, t.description, t.related_expert
        )
    });
    Ok(())
}

pub fn cmd_time(json: bool) -> Result<()> {
    let now = get_time();
    if json {
        print_json(&serde_json::json!({ "time": now }))
    } else {
        println!("{}", now);
        Ok(())
    }
}

fn print_lookup<T: Record>(result: &LookupResult<T>, line: impl Fn(&T) -> String) {
    if result.is_no_match() {
        println!("{}", T::NO_MATCH);
        return;
    }
    for record in result.records() {
        println!("{}\n", line(*record));
    }
}
