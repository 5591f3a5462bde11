//! Ready-made agent pairs for the supported conversations.
//!
//! Each constructor takes the model backend(s) for the LLM-driven side and
//! returns `(initiator, responder)`.

use crate::conversation::{Agent, ChatModel, SilentModel, TerminationRule};
use crate::prompt;
use crate::tools::ToolBindings;

pub const USER_PROXY: &str = "user_proxy";
pub const STORYTELLER: &str = "assistant";
pub const STUDENT: &str = "Student_Agent";
pub const TEACHER: &str = "Teacher_Agent";
pub const CLASSIFIER: &str = "classifier";
pub const K_ASSISTANT: &str = "K-Assistant";

/// Replies the storyteller may give before it is cut off.
pub const STORYTELLER_MAX_REPLIES: usize = 2;

/// Silent stand-in for the human that stops on the sentinel.
pub fn user_proxy(sentinel: &str) -> Agent {
    Agent::new(USER_PROXY, "", Box::new(SilentModel))
        .with_termination(TerminationRule::sentinel(sentinel))
}

/// User proxy and storyteller.
pub fn story_pair(model: Box<dyn ChatModel>, sentinel: &str) -> (Agent, Agent) {
    let storyteller = Agent::new(STORYTELLER, &prompt::storyteller_persona(sentinel), model)
        .with_termination(TerminationRule::MaxTurns(STORYTELLER_MAX_REPLIES));
    (user_proxy(sentinel), storyteller)
}

/// Student asking, teacher answering. Neither stops on its own.
pub fn classroom_pair(student: Box<dyn ChatModel>, teacher: Box<dyn ChatModel>) -> (Agent, Agent) {
    (
        Agent::new(STUDENT, prompt::STUDENT_PERSONA, student),
        Agent::new(TEACHER, prompt::TEACHER_PERSONA, teacher),
    )
}

/// User proxy and a classifier that answers exactly once.
pub fn classifier_pair(model: Box<dyn ChatModel>, sentinel: &str) -> (Agent, Agent) {
    let classifier = Agent::new(CLASSIFIER, prompt::CLASSIFIER_PERSONA, model)
        .with_termination(TerminationRule::MaxTurns(1));
    (user_proxy(sentinel), classifier)
}

/// User proxy and the tool-using assistant.
pub fn assistant_pair(
    model: Box<dyn ChatModel>,
    user_name: &str,
    language: &str,
    sentinel: &str,
) -> (Agent, Agent) {
    let assistant = Agent::new(
        K_ASSISTANT,
        &prompt::assistant_persona(user_name, language, sentinel),
        model,
    )
    .with_tools(ToolBindings::all())
    .with_termination(TerminationRule::sentinel(sentinel));
    (user_proxy(sentinel), assistant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn test_story_pair_roles() {
        let (proxy, teller) = story_pair(Box::new(SilentModel), "ALL DONE");
        assert_eq!(proxy.identity(), USER_PROXY);
        assert_eq!(proxy.termination(), &TerminationRule::sentinel("ALL DONE"));
        assert_eq!(teller.termination(), &TerminationRule::MaxTurns(2));
        assert!(teller.tools().is_empty());
    }

    #[test]
    fn test_assistant_pair_binds_all_tools() {
        let (_, assistant) = assistant_pair(Box::new(SilentModel), "Gild", "English", "ALL DONE");
        for kind in ToolKind::ALL {
            assert!(assistant.tools().contains(kind));
        }
        assert!(assistant.persona().contains("Gild"));
    }

    #[test]
    fn test_classroom_pair_never_terminates() {
        let (student, teacher) = classroom_pair(Box::new(SilentModel), Box::new(SilentModel));
        assert_eq!(student.termination(), &TerminationRule::Never);
        assert_eq!(teacher.persona(), prompt::TEACHER_PERSONA);
    }
}
