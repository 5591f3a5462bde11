//! Termination rules evaluated after each non-tool turn.

use crate::transcript::{Transcript, Turn};

/// When an agent considers the conversation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationRule {
    /// The latest non-tool turn contains this marker.
    Sentinel(String),
    /// The owning agent has spoken this many non-tool turns.
    MaxTurns(usize),
    /// Any of the nested rules holds.
    Any(Vec<TerminationRule>),
    Never,
}

impl TerminationRule {
    pub fn sentinel(marker: impl Into<String>) -> Self {
        Self::Sentinel(marker.into())
    }

    /// Evaluate for `owner` against the latest turn of `transcript`.
    /// Tool traffic never terminates.
    pub fn is_met(&self, owner: &str, transcript: &Transcript) -> bool {
        let Some(latest) = transcript.last() else {
            return false;
        };
        if latest.is_tool_traffic() {
            return false;
        }
        self.check(owner, latest, transcript)
    }

    fn check(&self, owner: &str, latest: &Turn, transcript: &Transcript) -> bool {
        match self {
            Self::Sentinel(marker) => !marker.is_empty() && latest.content.contains(marker.as_str()),
            Self::MaxTurns(n) => transcript.non_tool_turns_by(owner) >= *n,
            Self::Any(rules) => rules.iter().any(|r| r.check(owner, latest, transcript)),
            Self::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(turns: &[(&str, &str)]) -> Transcript {
        let mut t = Transcript::new();
        for (i, (speaker, text)) in turns.iter().enumerate() {
            if i == 0 {
                t.push(Turn::opening(speaker, text));
            } else {
                t.push(Turn::reply(speaker, text));
            }
        }
        t
    }

    #[test]
    fn test_sentinel_matches_substring() {
        let rule = TerminationRule::sentinel("ALL DONE");
        assert!(rule.is_met("user_proxy", &transcript(&[("a", "story... ALL DONE.")])));
        assert!(!rule.is_met("user_proxy", &transcript(&[("a", "all done")])));
        assert!(!TerminationRule::sentinel("").is_met("x", &transcript(&[("a", "anything")])));
    }

    #[test]
    fn test_max_turns_counts_owner_only() {
        let t = transcript(&[("proxy", "go"), ("assistant", "one"), ("proxy", ""), ("assistant", "two")]);
        assert!(TerminationRule::MaxTurns(2).is_met("assistant", &t));
        assert!(!TerminationRule::MaxTurns(3).is_met("assistant", &t));
    }

    #[test]
    fn test_any_and_never() {
        let t = transcript(&[("a", "hello")]);
        let rule = TerminationRule::Any(vec![TerminationRule::Never, TerminationRule::sentinel("hell")]);
        assert!(rule.is_met("b", &t));
        assert!(!TerminationRule::Never.is_met("b", &t));
        assert!(!TerminationRule::Any(vec![]).is_met("b", &t));
        assert!(!rule.is_met("b", &Transcript::new()));
    }
}
