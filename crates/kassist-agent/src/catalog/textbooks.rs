use serde::Serialize;

use super::{field_matches, LookupResult, Record};

/// A textbook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Textbook {
    pub title: &'static str,
    pub author: &'static str,
    pub discipline: &'static str,
    pub description: &'static str,
    /// Expert name, or `DEFAULT` for general material.
    pub related_expert: &'static str,
}

impl Record for Textbook {
    const NO_MATCH: &'static str = "No matching textbooks found.";

    fn key(&self) -> &str {
        self.title
    }
}

pub static TEXTBOOKS: &[Textbook] = &[
    Textbook {
        title: "The Digital Society",
        author: "Deborah Lupton",
        discipline: "Digital Sociology",
        description: "Explores how digital technologies shape contemporary social life, from identity to politics.",
        related_expert: "Gild",
    },
    Textbook {
        title: "Strategic Information Systems Planning",
        author: "Robert D. Galliers",
        discipline: "Information Systems Strategy",
        description: "Covers frameworks and methodologies for aligning IT with organizational strategy.",
        related_expert: "Professor Furen",
    },
    Textbook {
        title: "Technology and Society: Building Our Sociotechnical Future",
        author: "Deborah G. Johnson & Jameson M. Wetmore",
        discipline: "Technology and Society",
        description: "Analyzes how social, political, and cultural forces shape technology and vice versa.",
        related_expert: "Brian Smith",
    },
    Textbook {
        title: "Human-Computer Interaction",
        author: "Alan Dix et al.",
        discipline: "Human-Computer Interaction (HCI)",
        description: "A comprehensive introduction to theories, methods, and design principles in HCI.",
        related_expert: "Carla Gomez",
    },
    Textbook {
        title: "Computational Social Science",
        author: "Claudia Wagner et al.",
        discipline: "Computational Social Science",
        description: "Discusses how computational methods can model and analyze social phenomena.",
        related_expert: "Daniel Wu",
    },
    Textbook {
        title: "Networks, Crowds, and Markets",
        author: "David Easley & Jon Kleinberg",
        discipline: "Social Network Analysis",
        description: "An interdisciplinary look at how networks shape economics and behavior.",
        related_expert: "Gild",
    },
    Textbook {
        title: "IT Governance: How Top Performers Manage IT Decision Rights",
        author: "Jeanne W. Ross & Peter Weill",
        discipline: "Information Systems",
        description: "Practical guidance on structuring IT decision-making for organizational benefit.",
        related_expert: "Professor Furen",
    },
    Textbook {
        title: "Surveillance Capitalism",
        author: "Shoshana Zuboff",
        discipline: "Tech Policy / Ethics",
        description: "Critically examines how companies exploit personal data under modern capitalism.",
        related_expert: "Brian Smith",
    },
    Textbook {
        title: "Inclusive Design for a Digital World",
        author: "Regine Gilbert",
        discipline: "UX and Accessibility",
        description: "Guides designers on creating accessible and inclusive digital experiences.",
        related_expert: "Carla Gomez",
    },
    Textbook {
        title: "Agent-Based Models of Geographical Systems",
        author: "A. Heppenstall et al.",
        discipline: "Agent-Based Modeling",
        description: "Covers the use of ABMs in understanding complex social and spatial processes.",
        related_expert: "Daniel Wu",
    },
    Textbook {
        title: "Introduction to the Social Sciences",
        author: "Various",
        discipline: "General Knowledge",
        description: "Provides foundational understanding of sociology, economics, psychology, and anthropology.",
        related_expert: "DEFAULT",
    },
];

/// Single-value textbook filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextbookFilter<'a> {
    pub title: Option<&'a str>,
    pub discipline: Option<&'a str>,
    pub related_expert: Option<&'a str>,
}

/// Textbooks matching any supplied filter, in table order.
pub fn search_textbook(filter: &TextbookFilter<'_>) -> LookupResult<Textbook> {
    let hits = TEXTBOOKS
        .iter()
        .filter(|t| {
            field_matches(filter.title, t.title)
                || field_matches(filter.discipline, t.discipline)
                || field_matches(filter.related_expert, t.related_expert)
        })
        .collect();
    LookupResult::from_hits(hits)
}
