use serde::Serialize;

use super::{field_matches, LookupResult, Record};

/// An expert profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Expert {
    pub name: &'static str,
    pub email: &'static str,
    pub url: &'static str,
    pub discipline: &'static str,
    pub characteristic: &'static str,
    pub description: &'static str,
    pub interest: &'static str,
}

impl Record for Expert {
    const NO_MATCH: &'static str = "No matching experts found.";

    fn key(&self) -> &str {
        self.email
    }
}

pub static EXPERTS: &[Expert] = &[
    Expert {
        name: "Gild",
        email: "gild@me",
        url: "www.nthu.edu.tw",
        discipline: "Digital Sociology",
        characteristic: "Curious and analytical",
        description: "Gild examines how digital platforms influence social structures, identities, and collective behavior.",
        interest: "Online communities, data ethics, and social network analysis",
    },
    Expert {
        name: "Professor Furen",
        email: "furen.lin@example.com",
        url: "www.furen.lin.com",
        discipline: "Information Systems Strategy",
        characteristic: "Strategic and systems-oriented",
        description: "Furen researches how organizations leverage information systems to gain competitive advantage and enhance decision-making.",
        interest: "IT governance, digital transformation, and enterprise architecture",
    },
    Expert {
        name: "Brian Smith",
        email: "brian.smith@example.org",
        url: "www.briansmith.dev",
        discipline: "Technology and Society",
        characteristic: "Critical and forward-thinking",
        description: "Brian studies the societal impacts of emerging technologies, focusing on power, privacy, and inclusivity.",
        interest: "Tech policy, surveillance studies, and public interest technology",
    },
    Expert {
        name: "Carla Gomez",
        email: "carla.gomez@domain.net",
        url: "www.carladesigns.net",
        discipline: "Human-Computer Interaction (HCI)",
        characteristic: "Empathetic and research-driven",
        description: "Carla investigates how humans interact with digital systems, emphasizing usability and cultural context.",
        interest: "User research, interface design, and inclusive technology",
    },
    Expert {
        name: "Daniel Wu",
        email: "daniel.wu@mail.com",
        url: "www.danielwu.tech",
        discipline: "Computational Social Science",
        characteristic: "Innovative and data-savvy",
        description: "Daniel uses computational tools to analyze large-scale social phenomena, including opinion dynamics and misinformation.",
        interest: "Agent-based modeling, social simulations, and behavioral analytics",
    },
];

/// Single-value expert filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpertFilter<'a> {
    pub name: Option<&'a str>,
    pub discipline: Option<&'a str>,
    pub interest: Option<&'a str>,
}

/// Experts matching any supplied filter, in table order.
pub fn search_expert(filter: &ExpertFilter<'_>) -> LookupResult<Expert> {
    let hits = EXPERTS
        .iter()
        .filter(|e| {
            field_matches(filter.name, e.name)
                || field_matches(filter.discipline, e.discipline)
                || field_matches(filter.interest, e.interest)
        })
        .collect();
    LookupResult::from_hits(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(r: &LookupResult<Expert>) -> Vec<&'static str> {
        r.records().iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_keys_are_unique() {
        let mut emails: Vec<&str> = EXPERTS.iter().map(|e| e.key()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), EXPERTS.len());
    }

    #[test]
    fn test_filters_or_together() {
        let r = search_expert(&ExpertFilter {
            name: Some("wu"),
            discipline: Some("sociology"),
            interest: None,
        });
        assert_eq!(names(&r), vec!["Gild", "Daniel Wu"]);
    }

    #[test]
    fn test_interest_substring() {
        let r = search_expert(&ExpertFilter {
            interest: Some("SURVEILLANCE"),
            ..Default::default()
        });
        assert_eq!(names(&r), vec!["Brian Smith"]);
    }

    #[test]
    fn test_no_filter_matches_nothing() {
        assert!(search_expert(&ExpertFilter::default()).is_no_match());
        assert!(search_expert(&ExpertFilter {
            name: Some("Nobody"),
            ..Default::default()
        })
        .is_no_match());
    }
}
