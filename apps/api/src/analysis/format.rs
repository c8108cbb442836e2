//! Document-level format statistics — length, formatting anomalies, and
//! chronological-range aggregation.
//!
//! Length and duration run over normalized text; the formatting checks run
//! over the RAW text because the early-line-break check needs the original
//! line structure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Words per estimated resume page.
const WORDS_PER_PAGE: f64 = 500.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthAnalysis {
    pub word_count: usize,
    pub char_count: usize,
    /// word_count / 500, rounded to one decimal.
    pub estimated_pages: f64,
    pub is_too_long: bool,
    pub is_too_short: bool,
    pub optimal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattingIssues {
    pub issues: Vec<String>,
    pub has_issues: bool,
    /// Uppercase characters over total characters, rounded to three decimals.
    pub caps_ratio: f64,
}

/// One parsed `YYYY - YYYY|present` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub start: i32,
    /// The literal end year, or "Present" for open-ended ranges.
    pub end: String,
    pub duration_years: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceDuration {
    pub total_experience_years: i32,
    pub number_of_positions: usize,
    pub positions: Vec<ExperienceRange>,
}

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{3,}").unwrap());

/// Recognizable date shapes: year ranges, open-ended ranges, month-name dates.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{4}\s*-\s*\d{4}",
        r"(?i)\d{4}\s*-\s*(?:present|current)",
        r"(?i)(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{4})\s*-\s*(?:(\d{4})|present|current)").unwrap());

/// Word/character counts and page estimate over normalized text.
pub fn analyze_length(text: &str) -> LengthAnalysis {
    let word_count = text.split_whitespace().count();
    let pages = word_count as f64 / WORDS_PER_PAGE;

    LengthAnalysis {
        word_count,
        char_count: text.chars().count(),
        estimated_pages: (pages * 10.0).round() / 10.0,
        is_too_long: word_count > 1000,
        is_too_short: word_count < 200,
        optimal: (300..=800).contains(&word_count),
    }
}

/// Formatting anomaly checks over the raw text.
pub fn check_formatting_issues(text: &str) -> FormattingIssues {
    let mut issues = Vec::new();

    let total_chars = text.chars().count();
    let caps_ratio = if total_chars == 0 {
        0.0
    } else {
        let uppercase = text.chars().filter(|c| c.is_uppercase()).count();
        uppercase as f64 / total_chars as f64
    };
    if caps_ratio > 0.3 {
        issues.push("Excessive uppercase text".to_string());
    }

    if MULTI_SPACE.is_match(text) {
        issues.push("Multiple consecutive whitespace characters".to_string());
    }

    if !text.chars().take(200).any(|c| c == '\n') {
        issues.push("No line breaks near the start of the document".to_string());
    }

    if !DATE_PATTERNS.iter().any(|p| p.is_match(text)) {
        issues.push("Experience dates missing or unrecognized".to_string());
    }

    FormattingIssues {
        has_issues: !issues.is_empty(),
        issues,
        caps_ratio: (caps_ratio * 1000.0).round() / 1000.0,
    }
}

/// Finds every `YYYY - (YYYY|present|current)` range. Open-ended ranges close
/// at `current_year`; durations may sum across overlapping positions.
pub fn extract_experience_duration(text: &str, current_year: i32) -> ExperienceDuration {
    let mut positions = Vec::new();
    let mut total_years = 0;

    for caps in YEAR_RANGE.captures_iter(text) {
        let Ok(start) = caps[1].parse::<i32>() else {
            continue;
        };
        let (end_year, end_label) = match caps.get(2) {
            Some(end) => match end.as_str().parse::<i32>() {
                Ok(year) => (year, end.as_str().to_string()),
                Err(_) => continue,
            },
            None => (current_year, "Present".to_string()),
        };

        let duration = end_year - start;
        total_years += duration;
        positions.push(ExperienceRange {
            start,
            end: end_label,
            duration_years: duration,
        });
    }

    ExperienceDuration {
        total_experience_years: total_years,
        number_of_positions: positions.len(),
        positions,
    }
}
