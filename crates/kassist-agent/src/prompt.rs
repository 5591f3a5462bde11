//! Persona instructions and prompt templates.
//!
//! ## Templates
//!
//! | Template        | Placeholders                          | Used by   |
//! |-----------------|---------------------------------------|-----------|
//! | story           | `##PROMPT##`, user name, language     | `chat`    |
//! | classification  | `##PROMPT##`, job list, language      | `classify`|

use serde::{Deserialize, Serialize};

/// Replaced with the user's input in templates.
pub const PROMPT_PLACEHOLDER: &str = "##PROMPT##";

pub const STUDENT_PERSONA: &str = "You are a student willing to learn.";
pub const TEACHER_PERSONA: &str = "You are a math teacher.";

/// Storyteller persona; the reply ends with a separate sentinel message.
pub fn storyteller_persona(sentinel: &str) -> String {
    format!(
        "You are a helpful storyteller assistant. \
         Please give me a story. After your result, say '{sentinel}'. \
         Do not say '{sentinel}' in the same response."
    )
}

/// Persona of the tool-using assistant.
pub fn assistant_persona(user_name: &str, language: &str, sentinel: &str) -> String {
    format!(
        "You are K-Assistant, a helpful academic assistant talking to {user_name}.\n\
         You can look up experts (search_by_expert), textbooks (search_by_textbook), \
         recent Taipei Times news (search_by_news) and the current time (get_time).\n\
         Call a tool whenever the answer depends on those sources; never invent experts, \
         books or headlines. Discipline, interest and section filters take lists, so pass \
         every relevant value at once.\n\
         Answer in {language}. When your answer is complete, end it with '{sentinel}'."
    )
}

pub fn story_prompt(prompt: &str, user_name: &str, language: &str) -> String {
    let template = format!(
        "Give me a story started from '{PROMPT_PLACEHOLDER}'. \
         And remember to mention user's name {user_name} in the end. \
         Please express in {language}"
    );
    template.replace(PROMPT_PLACEHOLDER, prompt)
}

/// Task categories a user prompt can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobKind {
    DocumentTask,
    SelfIntroduce,
    LearningTask,
    ReplyTask,
    UserPersona,
    AgentPersona,
    OpeningMsg,
    SocialNetwork,
    AskQuestion,
    FallbackTask,
}

impl JobKind {
    pub const ALL: [JobKind; 10] = [
        JobKind::DocumentTask,
        JobKind::SelfIntroduce,
        JobKind::LearningTask,
        JobKind::ReplyTask,
        JobKind::UserPersona,
        JobKind::AgentPersona,
        JobKind::OpeningMsg,
        JobKind::SocialNetwork,
        JobKind::AskQuestion,
        JobKind::FallbackTask,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::DocumentTask => "DOCUMENT_TASK",
            Self::SelfIntroduce => "SELF_INTRODUCE",
            Self::LearningTask => "LEARNING_TASK",
            Self::ReplyTask => "REPLY_TASK",
            Self::UserPersona => "USER_PERSONA",
            Self::AgentPersona => "AGENT_PERSONA",
            Self::OpeningMsg => "OPENING_MSG",
            Self::SocialNetwork => "SOCIAL_NETWORK",
            Self::AskQuestion => "ASK_QUESTION",
            Self::FallbackTask => "FALLBACK_TASK",
        }
    }

    pub fn definitions(self) -> &'static [&'static str] {
        match self {
            Self::DocumentTask => &["Handles all actions related to individual documents or files."],
            Self::SelfIntroduce => &["Provides an introduction or detailed information about the agent when the user requests information about you. e.g. 'What can you do for me?', 'Introduce yourself', 'What can I do?'"],
            Self::LearningTask => &[
                "Handles actions where human want agent to learn from human inputs, including definition, feedback, clarification, corrections, or explanations from human inputs. The aim is to improve the agent's understanding, knowledge, or database over time, enabling it to adapt and enhance responses for future interactions.",
                "Human express opinions, ideas, thoughts.",
            ],
            Self::ReplyTask => &["Processes messages that begin with '[REPLY_TASK]', indicating that the response should follow the user's prompt exactly as specified, without any additional instructions or context."],
            Self::UserPersona => &["Manage user's profile settings or questions about user identity, e.g. asking user's name, profile; setting or modifying the user's name, preferences, or traits, and adjusts responses accordingly."],
            Self::AgentPersona => &["Manage agent's profile settings or questions about agent identity, e.g. asking agent's name, \"Who are you?\", \"What's your name?\", profile; setting or modifying the agent's name, personality traits, or behavior."],
            Self::OpeningMsg => &["Processes messages that begin with '[OPENING_MSG]:', creates greeting messages when the considering context and user preferences."],
            Self::SocialNetwork => &[
                "Handles actions and questions related to activities involving friends, social networks, communities, or groups. This includes setting or managing group notifications, integrating tools to deliver responses about recent group activities, member lists, group information, documents in the groups, time inquiries, notifications, or messaging groups.",
                "Handles actions and questions related to social network, relationship, messages, services.",
            ],
            Self::AskQuestion => &["Handles general Q&A from the user in any language, unrelated to operations to documents, introductions, social network, relationship, messages, or expert consultations."],
            Self::FallbackTask => &["Politely refuses requests that cannot be fulfilled or are not defined in the agent's job definitions, ensuring respectful and appropriate responses."],
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().trim_matches(|c| c == '[' || c == ']').to_ascii_uppercase();
        Self::ALL.into_iter().find(|k| k.label() == wanted)
    }
}

/// The job list rendered as a JSON object, label to definition(s).
pub fn job_definitions_json() -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for kind in JobKind::ALL {
        let defs = kind.definitions();
        let value = if defs.len() == 1 {
            serde_json::Value::from(defs[0])
        } else {
            serde_json::Value::from(defs.to_vec())
        };
        map.insert(kind.label().to_string(), value);
    }
    serde_json::Value::Object(map)
}

pub const CLASSIFIER_PERSONA: &str =
    "You are a classification agent. You reply with a single JSON object and nothing else.";

pub fn classification_prompt(prompt: &str, language: &str) -> String {
    let response_format = serde_json::json!({
        "JOB": "[Job classification for the prompt]",
        "PROMPT": "[Input from the user]"
    });
    let template = format!(
        "You are a classification agent, your job is to classify what {PROMPT_PLACEHOLDER} is \
         according to the job definition list in <JOB_DEFINITION>\
         <JOB_DEFINITION>{}</JOB_DEFINITION>\
         Please output in JSON-format only. JSON-format is as below: {}\
         Let's think step by step. Please output in {language}",
        job_definitions_json(),
        response_format
    );
    template.replace(PROMPT_PLACEHOLDER, prompt)
}

/// Parsed classifier answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "JOB")]
    pub job: String,
    #[serde(rename = "PROMPT", default)]
    pub prompt: String,
}

impl Classification {
    /// Known job category, if the label matches one.
    pub fn kind(&self) -> Option<JobKind> {
        JobKind::from_label(&self.job)
    }
}

/// Extract the first JSON object from a classifier reply. Tolerates code
/// fences and surrounding prose.
pub fn parse_classification(reply: &str) -> Option<Classification> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&reply[start..=end]).ok()
}
