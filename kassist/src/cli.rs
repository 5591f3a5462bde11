use clap::{Args, Parser, Subcommand};

/// K-Assistant - story chat, two-agent talks and a tool-using assistant
#[derive(Parser, Debug)]
#[command(name = "kassist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print raw transcripts / results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the LLM-backed commands.
#[derive(Args, Debug, Clone, Default)]
pub struct LlmArgs {
    /// Model name (default: from env or gpt-4o-mini)
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// Non-tool turn budget, the opening message included
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Marker that ends a conversation (default: from env or "ALL DONE")
    #[arg(long)]
    pub sentinel: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Story chat with the storyteller. Interactive when no prompt is given
    Chat {
        /// Story opening
        #[arg(value_name = "PROMPT")]
        prompt: Option<String>,

        /// Name mentioned at the end of the story
        #[arg(long)]
        user_name: Option<String>,

        /// Output language, e.g. "English" or "繁體中文"
        #[arg(long, short = 'l')]
        language: Option<String>,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Student_Agent asks, Teacher_Agent answers
    Talk {
        /// Opening message from the student
        #[arg(value_name = "PROMPT")]
        prompt: String,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Ask the tool-using assistant (experts, textbooks, news, time)
    Ask {
        #[arg(value_name = "PROMPT")]
        prompt: String,

        #[arg(long)]
        user_name: Option<String>,

        #[arg(long, short = 'l')]
        language: Option<String>,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Classify a prompt into one of the assistant's job categories
    Classify {
        #[arg(value_name = "PROMPT")]
        prompt: String,

        #[arg(long, short = 'l')]
        language: Option<String>,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Look up experts (lists are searched per entry and merged)
    Experts {
        #[arg(long)]
        name: Option<String>,

        /// Discipline filter; repeat for several
        #[arg(long = "discipline", value_name = "DISCIPLINE")]
        disciplines: Vec<String>,

        /// Interest filter; repeat for several
        #[arg(long = "interest", value_name = "INTEREST")]
        interests: Vec<String>,
    },

    /// Look up textbooks (lists are searched per entry and merged)
    Textbooks {
        #[arg(long)]
        title: Option<String>,

        /// Discipline filter; repeat for several
        #[arg(long = "discipline", value_name = "DISCIPLINE")]
        disciplines: Vec<String>,

        /// Related expert filter; repeat for several
        #[arg(long = "related-expert", value_name = "EXPERT")]
        related_experts: Vec<String>,
    },

    /// Fetch and search Taipei Times news
    News {
        /// Keyword or phrase
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Columns searched by QUERY; repeat for several (default: ar_head, ar_desc)
        #[arg(long = "column", value_name = "COLUMN")]
        columns: Vec<String>,

        /// Keep only these ar_section values; repeat for several
        #[arg(long = "section", value_name = "SECTION")]
        sections: Vec<String>,

        /// Start date inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// API list to fetch: all, front, taiwan, ... (default: from env or all)
        #[arg(long)]
        list: Option<String>,

        /// First page to fetch
        #[arg(long)]
        start_page: Option<u32>,

        /// Last page to fetch (inclusive)
        #[arg(long)]
        end_page: Option<u32>,

        /// Maximum rows returned; 0 for all
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the current local time
    Time,
}
