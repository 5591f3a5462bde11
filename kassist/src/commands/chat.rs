//! `kassist chat`: story chat between the user proxy and the storyteller.

use anyhow::Result;

use kassist_agent::personas;
use kassist_agent::prompt::story_prompt;
use kassist_agent::{Conversation, ConversationContext, NullSink, ToolRegistry};
use kassist_core::config::{ConversationConfig, LlmConfig, NewsConfig};

use super::{
    build_model, conversation_config, format_error, llm_config, outcome_json, print_messages,
    runtime, session_config, TerminalSink,
};
use crate::cli::LlmArgs;

pub fn cmd_chat(
    prompt: Option<String>,
    user_name: Option<String>,
    language: Option<String>,
    llm: &LlmArgs,
    json: bool,
) -> Result<()> {
    let llm_cfg = llm_config(llm)?;
    let conv_cfg = conversation_config(llm);
    let mut ctx = ConversationContext::from_config(&session_config(user_name, language));
    let registry = ToolRegistry::from_config(NewsConfig::from_env())?;

    let rt = runtime()?;
    match prompt {
        Some(p) => rt.block_on(story_turn(&registry, &llm_cfg, &conv_cfg, &mut ctx, &p, json)),
        None => rt.block_on(run_interactive(&registry, &llm_cfg, &conv_cfg, &mut ctx)),
    }
}

/// One story exchange. Prints the new messages and records them in `ctx`.
async fn story_turn(
    registry: &ToolRegistry,
    llm_cfg: &LlmConfig,
    conv_cfg: &ConversationConfig,
    ctx: &mut ConversationContext,
    input: &str,
    json: bool,
) -> Result<()> {
    let (proxy, storyteller) = personas::story_pair(build_model(llm_cfg)?, &conv_cfg.sentinel);
    let opening = story_prompt(input, &ctx.user_name, &ctx.language);
    let conversation = Conversation::new(registry, conv_cfg);

    let outcome = if json {
        conversation.run(&proxy, &storyteller, &opening, &mut NullSink).await?
    } else {
        let mut sink = TerminalSink::new(false);
        conversation.run(&proxy, &storyteller, &opening, &mut sink).await?
    };

    ctx.push_user(input);
    let added = ctx.record(&outcome.transcript, &conv_cfg.sentinel);
    if json {
        println!("{}", outcome_json(&outcome)?);
    } else {
        // The opening is the templated prompt; the user already saw their input.
        let story: Vec<_> = added
            .iter()
            .filter(|m| m.speaker.as_deref() == Some(personas::STORYTELLER))
            .cloned()
            .collect();
        print_messages(&story);
    }
    Ok(())
}

async fn run_interactive(
    registry: &ToolRegistry,
    llm_cfg: &LlmConfig,
    conv_cfg: &ConversationConfig,
    ctx: &mut ConversationContext,
) -> Result<()> {
    eprintln!("┌────────────────────────────────────────────────────────────");
    eprintln!("│  📖 K-Assistant stories  ·  model: {}", llm_cfg.model);
    eprintln!("│  user: {}  ·  language: {}", ctx.user_name, ctx.language);
    eprintln!("│  /exit quit  ·  /clear reset  ·  /lang <language> switch");
    eprintln!("└────────────────────────────────────────────────────────────\n");

    let mut rl = rustyline::DefaultEditor::new()
        .map_err(|e| anyhow::anyhow!("Failed to create line editor: {}", e))?;

    loop {
        match rl.readline("You> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match input {
                    "/exit" | "/quit" | "/q" => {
                        eprintln!("👋 Bye!");
                        break;
                    }
                    "/clear" => {
                        ctx.clear();
                        eprintln!("🗑️  Session cleared.");
                        continue;
                    }
                    _ => {}
                }
                if let Some(lang) = input.strip_prefix("/lang") {
                    let lang = lang.trim();
                    if lang.is_empty() {
                        eprintln!("Language: {}", ctx.language);
                    } else {
                        ctx.set_language(lang);
                        eprintln!("🌐 Language set to {}", lang);
                    }
                    continue;
                }

                eprintln!();
                if let Err(e) = story_turn(registry, llm_cfg, conv_cfg, ctx, input, false).await {
                    eprintln!("❌ {}", format_error(&e));
                    eprintln!();
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                eprintln!("\n^C");
                eprintln!("👋 Bye!");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                eprintln!("👋 Bye!");
                break;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    tracing::debug!(session = %ctx.id, messages = ctx.messages().len(), "chat session ended");
    Ok(())
}
