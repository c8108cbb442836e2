//! Content quality heuristics over a text span — verb strength, quantifiable
//! achievements, bullet shape, filler words, sentence statistics.
//!
//! Every sub-analysis is independent. The two that need the linguistic
//! capability (passive voice, sentence stats) degrade to empty results when
//! it is absent; the rest are plain pattern matching and always run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::linguistics::{Linguistics, DEP_AUXPASS};

// ────────────────────────────────────────────────────────────────────────────
// Vocabulary tables
// ────────────────────────────────────────────────────────────────────────────

/// Weak and auxiliary phrasing. Multi-word entries match as substrings of the
/// lowercased span; matching is deliberately not attributed per sentence.
const WEAK_VERBS: &[&str] = &[
    "was",
    "were",
    "is",
    "are",
    "been",
    "be",
    "being",
    "had",
    "has",
    "have",
    "having",
    "responsible for",
    "tasked with",
    "worked on",
    "involved in",
    "helped",
    "assisted",
    "participated",
];

const STRONG_ACTION_VERBS: &[&str] = &[
    "achieved",
    "accelerated",
    "accomplished",
    "delivered",
    "designed",
    "developed",
    "directed",
    "engineered",
    "established",
    "executed",
    "generated",
    "implemented",
    "improved",
    "increased",
    "initiated",
    "launched",
    "led",
    "managed",
    "optimized",
    "orchestrated",
    "pioneered",
    "reduced",
    "resolved",
    "spearheaded",
    "streamlined",
    "transformed",
    "built",
    "created",
    "drove",
    "enhanced",
];

const FILLER_WORDS: &[&str] = &[
    "very", "really", "just", "actually", "basically", "literally", "obviously", "clearly",
    "simply", "extremely", "quite", "rather",
];

/// Shapes of a measured outcome: percentages, currency, scale words,
/// change-by-N phrasing, multipliers, rankings, head counts.
static METRIC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\d+%",
        r"(?i)\$\d+[KMB]?",
        r"(?i)\d+\+?\s*(?:million|thousand|billion|users|customers|clients)",
        r"(?i)(?:increased|decreased|improved|reduced|grew|saved)\s+(?:by\s+)?\d+",
        r"(?i)\d+x",
        r"(?i)top\s+\d+",
        r"(?i)#\d+",
        r"(?i)\d+\s+(?:people|members|engineers|developers|employees)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// A line is a bullet if any of these matches its stripped form:
/// classic glyphs, `1.`-style numbering, `a)`-style lettering.
static BULLET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"^\s*[•\-\*]\s*.+", r"^\s*\d+\.\s+.+", r"^\s*[a-z]\)\s+.+"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbAnalysis {
    /// Governing verbs of passive constructions, one entry per occurrence.
    pub passive_verbs: Vec<String>,
    pub passive_count: usize,
    /// Distinct weak terms found.
    pub weak_verbs: Vec<String>,
    pub weak_count: usize,
    /// Distinct strong action verbs found.
    pub strong_verbs: Vec<String>,
    pub strong_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsAnalysis {
    pub has_metrics: bool,
    pub metrics_count: usize,
    /// First five literal matches, for recommendations and reports.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletAnalysis {
    pub bullet_count: usize,
    pub has_bullets: bool,
    /// Mean token count across bullet lines, rounded to one decimal.
    pub avg_bullet_length: f64,
    /// Average length in the 10–20 token window (inclusive).
    pub optimal_length: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillerAnalysis {
    /// Total occurrences, not distinct words.
    pub filler_count: usize,
    /// Distinct filler words, in first-seen order.
    pub filler_words: Vec<String>,
    pub has_too_many: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    /// Sentences longer than 30 tokens.
    pub long_sentence_count: usize,
    pub has_long_sentences: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyses
// ────────────────────────────────────────────────────────────────────────────

/// Verb usage over a span. Passive constructions come from the linguistic
/// parse (empty when the capability is absent); weak/strong detection is
/// substring containment against the vocabularies, counting distinct terms.
pub fn analyze_verbs(text: &str, linguistics: &dyn Linguistics) -> VerbAnalysis {
    let lowered = text.to_lowercase();

    let passive_verbs: Vec<String> = linguistics
        .parse(&lowered)
        .into_iter()
        .filter(|token| token.dep == DEP_AUXPASS)
        .map(|token| token.head)
        .collect();

    let weak_verbs: Vec<String> = WEAK_VERBS
        .iter()
        .filter(|verb| lowered.contains(*verb))
        .map(|verb| verb.to_string())
        .collect();

    let strong_verbs: Vec<String> = STRONG_ACTION_VERBS
        .iter()
        .filter(|verb| lowered.contains(*verb))
        .map(|verb| verb.to_string())
        .collect();

    VerbAnalysis {
        passive_count: passive_verbs.len(),
        weak_count: weak_verbs.len(),
        strong_count: strong_verbs.len(),
        passive_verbs,
        weak_verbs,
        strong_verbs,
    }
}

/// Union of all metric-pattern matches, with the first five kept as examples.
pub fn detect_quantifiable_achievements(text: &str) -> MetricsAnalysis {
    let mut found = Vec::new();
    for pattern in METRIC_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            found.push(m.as_str().to_string());
        }
    }

    MetricsAnalysis {
        has_metrics: !found.is_empty(),
        metrics_count: found.len(),
        examples: found.into_iter().take(5).collect(),
    }
}

/// Bullet-shape statistics over the raw (line-broken) text.
pub fn analyze_bullet_points(raw_text: &str) -> BulletAnalysis {
    let bullet_lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| BULLET_PATTERNS.iter().any(|p| p.is_match(line)))
        .collect();

    let avg = if bullet_lines.is_empty() {
        0.0
    } else {
        let total_tokens: usize = bullet_lines
            .iter()
            .map(|line| line.split_whitespace().count())
            .sum();
        total_tokens as f64 / bullet_lines.len() as f64
    };

    BulletAnalysis {
        bullet_count: bullet_lines.len(),
        has_bullets: !bullet_lines.is_empty(),
        avg_bullet_length: (avg * 10.0).round() / 10.0,
        optimal_length: (10.0..=20.0).contains(&avg),
    }
}

/// Exact lowercase token membership against the filler vocabulary.
pub fn check_filler_words(text: &str) -> FillerAnalysis {
    let lowered = text.to_lowercase();
    let fillers: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| FILLER_WORDS.contains(word))
        .collect();

    let mut distinct: Vec<String> = Vec::new();
    for filler in &fillers {
        let owned = filler.to_string();
        if !distinct.contains(&owned) {
            distinct.push(owned);
        }
    }

    FillerAnalysis {
        filler_count: fillers.len(),
        has_too_many: fillers.len() > 5,
        filler_words: distinct,
    }
}

/// Sentence statistics via the linguistic capability. Degrades to the default
/// (all-zero) result when sentence splitting is unavailable.
pub fn analyze_sentence_structure(text: &str, linguistics: &dyn Linguistics) -> SentenceAnalysis {
    let sentences = linguistics.sentences(text);
    if sentences.is_empty() {
        return SentenceAnalysis::default();
    }

    let total_tokens: usize = sentences.iter().map(Vec::len).sum();
    let avg = total_tokens as f64 / sentences.len() as f64;
    let long_count = sentences.iter().filter(|s| s.len() > 30).count();

    SentenceAnalysis {
        sentence_count: sentences.len(),
        avg_sentence_length: (avg * 10.0).round() / 10.0,
        long_sentence_count: long_count,
        has_long_sentences: long_count > 0,
    }
}
