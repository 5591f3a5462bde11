//! `kassist talk`: Student_Agent and Teacher_Agent talk for a fixed number of turns.

use anyhow::Result;

use kassist_agent::{personas, render_transcript, Conversation, NullSink, ToolRegistry};
use kassist_core::config::NewsConfig;

use super::{
    build_model, conversation_config, describe_stop, llm_config, outcome_json, print_messages,
    runtime, TerminalSink,
};
use crate::cli::LlmArgs;

pub fn cmd_talk(prompt: &str, llm: &LlmArgs, json: bool) -> Result<()> {
    let llm_cfg = llm_config(llm)?;
    let conv_cfg = conversation_config(llm);
    let registry = ToolRegistry::from_config(NewsConfig::from_env())?;
    let (student, teacher) =
        personas::classroom_pair(build_model(&llm_cfg)?, build_model(&llm_cfg)?);

    let rt = runtime()?;
    let outcome = rt.block_on(async {
        let conversation = Conversation::new(&registry, &conv_cfg);
        if json {
            conversation.run(&student, &teacher, prompt, &mut NullSink).await
        } else {
            let mut sink = TerminalSink::new(false);
            conversation.run(&student, &teacher, prompt, &mut sink).await
        }
    })?;

    if json {
        println!("{}", outcome_json(&outcome)?);
    } else {
        print_messages(&render_transcript(&outcome.transcript, &conv_cfg.sentinel));
        eprintln!("({}, {} turns)", describe_stop(&outcome.stop), outcome.transcript.non_tool_turns());
    }
    Ok(())
}
