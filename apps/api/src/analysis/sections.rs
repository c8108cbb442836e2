//! Section segmentation — classifies document regions into a fixed taxonomy
//! of named sections and slices out one section's text span.
//!
//! Heading patterns are line-anchored and run against the RAW text: the
//! normalizer destroys the line breaks the anchors depend on.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The closed section taxonomy, in declaration order.
pub const SECTION_NAMES: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
    "summary",
    "associative",
    "languages",
];

/// Sections whose absence triggers a high-priority recommendation.
pub const CRITICAL_SECTIONS: &[&str] = &["experience", "education", "skills"];

/// Heading patterns per section, in match-priority order. English and French
/// headings; all are compiled case-insensitive and multi-line.
static SECTION_PATTERNS: &[(&str, &[&str])] = &[
    (
        "experience",
        &[
            r"^(?:professional\s+)?(?:work\s+)?experience",
            r"^employment\s+history",
            r"^work\s+history",
            r"^career\s+history",
            r"^expérience\s+professionnelle",
        ],
    ),
    (
        "education",
        &[
            r"^education(?:al\s+background)?",
            r"^academic\s+(?:background|qualifications)",
            r"^qualifications",
            r"^formation",
        ],
    ),
    (
        "skills",
        &[
            r"^(?:technical\s+)?skills",
            r"^competenc(?:ies|es)",
            r"^expertise",
            r"^compétences",
        ],
    ),
    (
        "projects",
        &[
            r"^academic\s+projects?",
            r"^projects?",
            r"^portfolio",
            r"^projets",
        ],
    ),
    (
        "certifications",
        &[r"^certifications?", r"^licenses?", r"^credentials"],
    ),
    (
        "summary",
        &[
            r"^(?:professional\s+)?summary",
            r"^profile",
            r"^objective",
            r"^about\s+me",
            r"^résumé",
        ],
    ),
    (
        "associative",
        &[
            r"^associative\s+experience",
            r"^volunteer\s+experience",
            r"^activities",
        ],
    ),
    ("languages", &[r"^languages?", r"^langues?"]),
];

static COMPILED: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    SECTION_PATTERNS
        .iter()
        .map(|(name, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(&format!("(?im){p}")).unwrap())
                .collect();
            (*name, compiled)
        })
        .collect()
});

/// Presence map over the fixed section taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap(pub BTreeMap<String, bool>);

impl SectionMap {
    pub fn is_present(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Section names with no heading match, in taxonomy order.
    pub fn missing(&self) -> Vec<String> {
        SECTION_NAMES
            .iter()
            .filter(|name| !self.is_present(name))
            .map(|name| name.to_string())
            .collect()
    }

    pub fn present_count(&self) -> usize {
        self.0.values().filter(|present| **present).count()
    }
}

/// Checks every section for a heading match anywhere in the raw text.
pub fn detect_sections(raw_text: &str) -> SectionMap {
    let map = COMPILED
        .iter()
        .map(|(name, patterns)| {
            let found = patterns.iter().any(|p| p.is_match(raw_text));
            (name.to_string(), found)
        })
        .collect();
    SectionMap(map)
}

/// Extracts the text span belonging to `section`.
///
/// The span starts right after the FIRST of the section's own patterns that
/// matches, and ends at the nearest subsequent heading match of any OTHER
/// section (minimum start offset wins), or at end of text. A section with no
/// heading match yields an empty string.
pub fn extract_section_content(raw_text: &str, section: &str) -> String {
    let Some((_, own_patterns)) = COMPILED.iter().find(|(name, _)| *name == section) else {
        return String::new();
    };

    for pattern in own_patterns {
        let Some(m) = pattern.find(raw_text) else {
            continue;
        };
        let rest = &raw_text[m.end()..];

        let mut span_end = rest.len();
        for (other, other_patterns) in COMPILED.iter() {
            if *other == section {
                continue;
            }
            for other_pattern in other_patterns {
                if let Some(next) = other_pattern.find(rest) {
                    span_end = span_end.min(next.start());
                }
            }
        }
        return rest[..span_end].trim().to_string();
    }

    String::new()
}
