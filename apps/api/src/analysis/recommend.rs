//! Recommendation generation — maps analyzer outputs to a prioritized list
//! of issues with actionable advice. Stateless; every applicable rule fires
//! independently, then the list is stably sorted by priority.

use serde::{Deserialize, Serialize};

use crate::analysis::contact::ContactInfo;
use crate::analysis::format::LengthAnalysis;
use crate::analysis::quality::{BulletAnalysis, FillerAnalysis, MetricsAnalysis, VerbAnalysis};
use crate::analysis::sections::{SectionMap, CRITICAL_SECTIONS};

/// Urgency bucket. Variant order doubles as sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub issue: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl Recommendation {
    fn new(priority: Priority, category: &str, issue: String, recommendation: String) -> Self {
        Self {
            priority,
            category: category.to_string(),
            issue,
            recommendation,
            examples: Vec::new(),
        }
    }
}

/// Evaluates every rule and returns the recommendations ordered
/// HIGH → MEDIUM → LOW, ties keeping generation order.
pub fn generate_recommendations(
    contacts: &ContactInfo,
    sections: &SectionMap,
    verbs: &VerbAnalysis,
    metrics: &MetricsAnalysis,
    length: &LengthAnalysis,
    fillers: &FillerAnalysis,
    bullets: &BulletAnalysis,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !contacts.has_email() {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Contact",
            "Email address missing".to_string(),
            "Add a professional email address, visible at the top of the resume".to_string(),
        ));
    }

    if !contacts.has_linkedin() {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Contact",
            "LinkedIn profile missing".to_string(),
            "Add your LinkedIn profile to increase your visibility".to_string(),
        ));
    }

    for section in CRITICAL_SECTIONS {
        if !sections.is_present(section) {
            recommendations.push(Recommendation::new(
                Priority::High,
                "Structure",
                format!("Missing {section} section"),
                format!("Add a clearly titled section for {section}"),
            ));
        }
    }

    if verbs.passive_count > 3 {
        let mut rec = Recommendation::new(
            Priority::High,
            "Content",
            format!("{} passive constructions detected", verbs.passive_count),
            "Replace passive phrasing with action verbs (e.g. \"Managed\" instead of \
             \"Was responsible for\")"
                .to_string(),
        );
        rec.examples = verbs.passive_verbs.iter().take(3).cloned().collect();
        recommendations.push(rec);
    }

    if verbs.strong_count < 5 {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Content",
            "Few strong action verbs".to_string(),
            "Use more impactful action verbs: achieved, implemented, led, optimized, etc."
                .to_string(),
        ));
    }

    if !metrics.has_metrics || metrics.metrics_count < 3 {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Impact",
            "Lack of quantifiable results".to_string(),
            "Add concrete numbers: percentages, amounts, number of projects or people, timelines"
                .to_string(),
        ));
    }

    if length.is_too_long {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Format",
            "Resume too long".to_string(),
            format!(
                "Reduce the length to 1-2 pages ({} words currently)",
                length.word_count
            ),
        ));
    }

    if fillers.has_too_many {
        let examples: Vec<String> = fillers.filler_words.iter().take(5).cloned().collect();
        let mut rec = Recommendation::new(
            Priority::Low,
            "Style",
            "Excessive filler words".to_string(),
            format!("Remove unnecessary words: {}", examples.join(", ")),
        );
        rec.examples = examples;
        recommendations.push(rec);
    }

    if !bullets.has_bullets {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Format",
            "No bullet points".to_string(),
            "Use bullet points to present your achievements clearly".to_string(),
        ));
    }

    recommendations.sort_by_key(|rec| rec.priority.rank());
    recommendations
}
