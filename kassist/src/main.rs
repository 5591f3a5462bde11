mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use kassist_core::observability::{init_tracing, TracingMode};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = match cli.command {
        Commands::Chat { .. } | Commands::Talk { .. } | Commands::Ask { .. } => TracingMode::Chat,
        _ => TracingMode::Default,
    };
    init_tracing(mode);

    let json = cli.json;
    match cli.command {
        Commands::Chat {
            prompt,
            user_name,
            language,
            llm,
        } => commands::chat::cmd_chat(prompt, user_name, language, &llm, json)?,
        Commands::Talk { prompt, llm } => commands::talk::cmd_talk(&prompt, &llm, json)?,
        Commands::Ask {
            prompt,
            user_name,
            language,
            llm,
        } => commands::ask::cmd_ask(&prompt, user_name, language, &llm, json)?,
        Commands::Classify {
            prompt,
            language,
            llm,
        } => commands::classify::cmd_classify(&prompt, language, &llm, json)?,
        Commands::Experts {
            name,
            disciplines,
            interests,
        } => commands::lookup::cmd_experts(name, disciplines, interests, json)?,
        Commands::Textbooks {
            title,
            disciplines,
            related_experts,
        } => commands::lookup::cmd_textbooks(title, disciplines, related_experts, json)?,
        Commands::News {
            query,
            columns,
            sections,
            from,
            to,
            list,
            start_page,
            end_page,
            limit,
        } => commands::news::cmd_news(
            commands::news::NewsOptions {
                query,
                columns,
                sections,
                date_from: from,
                date_to: to,
                list,
                start_page,
                end_page,
                limit,
            },
            json,
        )?,
        Commands::Time => commands::lookup::cmd_time(json)?,
    }

    Ok(())
}
