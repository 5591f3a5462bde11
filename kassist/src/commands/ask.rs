//! `kassist ask`: one question to the tool-using assistant.

use anyhow::Result;

use kassist_agent::{personas, Conversation, ConversationContext, NullSink, ToolRegistry};
use kassist_core::config::NewsConfig;

use super::{
    build_model, conversation_config, llm_config, outcome_json, print_messages, runtime,
    session_config, TerminalSink,
};
use crate::cli::LlmArgs;

pub fn cmd_ask(
    prompt: &str,
    user_name: Option<String>,
    language: Option<String>,
    llm: &LlmArgs,
    json: bool,
) -> Result<()> {
    let llm_cfg = llm_config(llm)?;
    let conv_cfg = conversation_config(llm);
    let mut ctx = ConversationContext::from_config(&session_config(user_name, language));
    let registry = ToolRegistry::from_config(NewsConfig::from_env())?;
    let (proxy, assistant) = personas::assistant_pair(
        build_model(&llm_cfg)?,
        &ctx.user_name,
        &ctx.language,
        &conv_cfg.sentinel,
    );

    let rt = runtime()?;
    let outcome = rt.block_on(async {
        let conversation = Conversation::new(&registry, &conv_cfg);
        if json {
            conversation.run(&proxy, &assistant, prompt, &mut NullSink).await
        } else {
            let mut sink = TerminalSink::new(true);
            conversation.run(&proxy, &assistant, prompt, &mut sink).await
        }
    })?;

    if json {
        println!("{}", outcome_json(&outcome)?);
        return Ok(());
    }

    let replies: Vec<_> = ctx
        .record(&outcome.transcript, &conv_cfg.sentinel)
        .iter()
        .filter(|m| m.speaker.as_deref() == Some(personas::K_ASSISTANT))
        .cloned()
        .collect();
    if replies.is_empty() {
        eprintln!("(no answer)");
    }
    print_messages(&replies);
    Ok(())
}
