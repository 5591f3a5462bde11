//! `kassist classify`: map a prompt to one of the job categories.

use anyhow::Result;
use serde_json::json;

use kassist_agent::personas;
use kassist_agent::prompt::{classification_prompt, parse_classification};
use kassist_agent::{Conversation, NullSink, ToolRegistry, Turn};
use kassist_core::config::NewsConfig;

use super::{build_model, conversation_config, llm_config, print_json, runtime, session_config};
use crate::cli::LlmArgs;

pub fn cmd_classify(prompt: &str, language: Option<String>, llm: &LlmArgs, json: bool) -> Result<()> {
    let llm_cfg = llm_config(llm)?;
    let conv_cfg = conversation_config(llm);
    let session = session_config(None, language);
    let registry = ToolRegistry::from_config(NewsConfig::from_env())?;
    let (proxy, classifier) = personas::classifier_pair(build_model(&llm_cfg)?, &conv_cfg.sentinel);
    let opening = classification_prompt(prompt, &session.language);

    let rt = runtime()?;
    let outcome = rt.block_on(async {
        Conversation::new(&registry, &conv_cfg)
            .run(&proxy, &classifier, &opening, &mut NullSink)
            .await
    })?;

    let reply = outcome
        .transcript
        .turns()
        .iter()
        .rev()
        .find(|t| t.is_from(personas::CLASSIFIER) && !t.is_tool_traffic())
        .map(|t: &Turn| t.content.as_str())
        .unwrap_or_default();

    let Some(classification) = parse_classification(reply) else {
        tracing::warn!(reply = %reply, "classifier reply is not JSON");
        anyhow::bail!("Classifier did not return a JSON object: {}", reply.trim());
    };

    if json {
        print_json(&json!({
            "JOB": classification.job,
            "PROMPT": classification.prompt,
            "known": classification.kind().is_some(),
        }))?;
    } else {
        match classification.kind() {
            Some(kind) => println!("{}", kind.label()),
            None => println!("{} (unknown category)", classification.job),
        }
    }
    Ok(())
}
