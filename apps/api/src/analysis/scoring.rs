//! Deterministic weighted aggregation of all analyzer outputs into a 0–100
//! score with a per-category breakdown and a qualitative level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::contact::ContactInfo;
use crate::analysis::format::{FormattingIssues, LengthAnalysis};
use crate::analysis::quality::{BulletAnalysis, FillerAnalysis, MetricsAnalysis, VerbAnalysis};
use crate::analysis::sections::SectionMap;

/// Qualitative level derived from the total score. The thresholds here are
/// the single source of truth — the score-lookup endpoint reuses
/// `from_score` rather than duplicating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLevel {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs improvement")]
    NeedsImprovement,
}

impl ScoreLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ScoreLevel::Excellent
        } else if score >= 60 {
            ScoreLevel::Good
        } else if score >= 40 {
            ScoreLevel::Average
        } else {
            ScoreLevel::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "Excellent",
            ScoreLevel::Good => "Good",
            ScoreLevel::Average => "Average",
            ScoreLevel::NeedsImprovement => "Needs improvement",
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points per category, in the fixed category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub contact_info: u32,
    pub sections: u32,
    pub verb_quality: u32,
    pub quantifiable_achievements: u32,
    pub format: u32,
    pub bullet_points: u32,
    pub language_quality: u32,
}

impl ScoreBreakdown {
    /// Category labels and points in declaration order, for reports.
    pub fn entries(&self) -> [(&'static str, u32); 7] {
        [
            ("Contact info", self.contact_info),
            ("Sections", self.sections),
            ("Verb quality", self.verb_quality),
            ("Quantifiable achievements", self.quantifiable_achievements),
            ("Format", self.format),
            ("Bullet points", self.bullet_points),
            ("Language quality", self.language_quality),
        ]
    }

    fn sum(&self) -> u32 {
        self.contact_info
            + self.sections
            + self.verb_quality
            + self.quantifiable_achievements
            + self.format
            + self.bullet_points
            + self.language_quality
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub total: u32,
    pub level: ScoreLevel,
    pub breakdown: ScoreBreakdown,
}

/// Weighted sum over the seven categories. Each category is clamped to its
/// own range before summing; the total is clamped to [0, 100].
#[allow(clippy::too_many_arguments)]
pub fn calculate_score(
    contacts: &ContactInfo,
    sections: &SectionMap,
    verbs: &VerbAnalysis,
    metrics: &MetricsAnalysis,
    length: &LengthAnalysis,
    formatting: &FormattingIssues,
    bullets: &BulletAnalysis,
    fillers: &FillerAnalysis,
) -> Score {
    // Contact information — 10 points.
    let mut contact_score = 0;
    if contacts.has_email() {
        contact_score += 3;
    }
    if contacts.has_phone() {
        contact_score += 2;
    }
    if contacts.has_linkedin() {
        contact_score += 3;
    }
    if contacts.has_github() {
        contact_score += 2;
    }
    if contacts.has_location() {
        contact_score += 2;
    }

    // Sections — 3 points each, capped at 15.
    let section_score = (3 * sections.present_count() as u32).min(15);

    // Verb quality — penalties for passive/weak, bonus for strong, floor 0.
    let verb_score = {
        let penalty_passive = (verbs.passive_count as i64 * 2).min(10);
        let penalty_weak = (verbs.weak_count as i64).min(5);
        let bonus_strong = (verbs.strong_count as i64 * 2).min(15);
        (bonus_strong - penalty_passive - penalty_weak).max(0) as u32
    };

    // Quantifiable achievements — 4 points per metric, capped at 20.
    let metrics_score = if metrics.has_metrics {
        (metrics.metrics_count as u32 * 4).min(20)
    } else {
        0
    };

    // Format — start at 15, penalize bad length and formatting issues.
    let format_score = {
        let mut score = 15i64;
        if length.is_too_long || length.is_too_short {
            score -= 5;
        }
        if formatting.has_issues {
            score -= 3;
        }
        score.max(0) as u32
    };

    // Bullet points — presence and optimal average length.
    let mut bullet_score = 0;
    if bullets.has_bullets {
        bullet_score += 5;
    }
    if bullets.optimal_length {
        bullet_score += 5;
    }

    // Language quality — filler-word penalty.
    let language_score = 10 - (fillers.filler_count as u32).min(10);

    let breakdown = ScoreBreakdown {
        contact_info: contact_score,
        sections: section_score,
        verb_quality: verb_score,
        quantifiable_achievements: metrics_score,
        format: format_score,
        bullet_points: bullet_score,
        language_quality: language_score,
    };

    let total = breakdown.sum().min(100);

    Score {
        total,
        level: ScoreLevel::from_score(total),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sections_with(present: &[&str]) -> SectionMap {
        let map: BTreeMap<String, bool> = crate::analysis::sections::SECTION_NAMES
            .iter()
            .map(|name| (name.to_string(), present.contains(name)))
            .collect();
        SectionMap(map)
    }

    fn contacts_with_email() -> ContactInfo {
        ContactInfo {
            emails: vec!["jane@example.com".to_string()],
            ..ContactInfo::default()
        }
    }

    /// The worked scoring example: one email, sections {experience,
    /// education}, 6 strong verbs, 4 metrics, optimal clean format, optimal
    /// bullets, no fillers → 3+6+12+16+15+10+10 = 72, level Good.
    #[test]
    fn test_worked_example_totals_72_good() {
        let verbs = VerbAnalysis {
            strong_count: 6,
            ..VerbAnalysis::default()
        };
        let metrics = MetricsAnalysis {
            has_metrics: true,
            metrics_count: 4,
            examples: vec![],
        };
        let length = LengthAnalysis {
            word_count: 500,
            optimal: true,
            ..LengthAnalysis::default()
        };
        let bullets = BulletAnalysis {
            bullet_count: 6,
            has_bullets: true,
            avg_bullet_length: 14.0,
            optimal_length: true,
        };

        let score = calculate_score(
            &contacts_with_email(),
            &sections_with(&["experience", "education"]),
            &verbs,
            &metrics,
            &length,
            &FormattingIssues::default(),
            &bullets,
            &FillerAnalysis::default(),
        );

        assert_eq!(score.breakdown.contact_info, 3);
        assert_eq!(score.breakdown.sections, 6);
        assert_eq!(score.breakdown.verb_quality, 12);
        assert_eq!(score.breakdown.quantifiable_achievements, 16);
        assert_eq!(score.breakdown.format, 15);
        assert_eq!(score.breakdown.bullet_points, 10);
        assert_eq!(score.breakdown.language_quality, 10);
        assert_eq!(score.total, 72);
        assert_eq!(score.level, ScoreLevel::Good);
    }

    #[test]
    fn test_verb_score_floors_at_zero() {
        let verbs = VerbAnalysis {
            passive_count: 10,
            weak_count: 10,
            strong_count: 0,
            ..VerbAnalysis::default()
        };
        let score = calculate_score(
            &ContactInfo::default(),
            &sections_with(&[]),
            &verbs,
            &MetricsAnalysis::default(),
            &LengthAnalysis::default(),
            &FormattingIssues::default(),
            &BulletAnalysis::default(),
            &FillerAnalysis::default(),
        );
        assert_eq!(score.breakdown.verb_quality, 0);
    }

    #[test]
    fn test_verb_bonus_caps_at_15() {
        let verbs = VerbAnalysis {
            strong_count: 30,
            ..VerbAnalysis::default()
        };
        let score = calculate_score(
            &ContactInfo::default(),
            &sections_with(&[]),
            &verbs,
            &MetricsAnalysis::default(),
            &LengthAnalysis::default(),
            &FormattingIssues::default(),
            &BulletAnalysis::default(),
            &FillerAnalysis::default(),
        );
        assert_eq!(score.breakdown.verb_quality, 15);
    }

    #[test]
    fn test_section_score_caps_at_15() {
        let all: Vec<&str> = crate::analysis::sections::SECTION_NAMES.to_vec();
        let score = calculate_score(
            &ContactInfo::default(),
            &sections_with(&all),
            &VerbAnalysis::default(),
            &MetricsAnalysis::default(),
            &LengthAnalysis::default(),
            &FormattingIssues::default(),
            &BulletAnalysis::default(),
            &FillerAnalysis::default(),
        );
        // 8 sections × 3 = 24, capped.
        assert_eq!(score.breakdown.sections, 15);
    }

    #[test]
    fn test_metrics_score_caps_at_20() {
        let metrics = MetricsAnalysis {
            has_metrics: true,
            metrics_count: 12,
            examples: vec![],
        };
        let score = calculate_score(
            &ContactInfo::default(),
            &sections_with(&[]),
            &VerbAnalysis::default(),
            &metrics,
            &LengthAnalysis::default(),
            &FormattingIssues::default(),
            &BulletAnalysis::default(),
            &FillerAnalysis::default(),
        );
        assert_eq!(score.breakdown.quantifiable_achievements, 20);
    }

    #[test]
    fn test_format_penalties_stack() {
        let length = LengthAnalysis {
            word_count: 1500,
            is_too_long: true,
            ..LengthAnalysis::default()
        };
        let formatting = FormattingIssues {
            issues: vec!["Excessive uppercase text".to_string()],
            has_issues: true,
            caps_ratio: 0.5,
        };
        let score = calculate_score(
            &ContactInfo::default(),
            &sections_with(&[]),
            &VerbAnalysis::default(),
            &MetricsAnalysis::default(),
            &length,
            &formatting,
            &BulletAnalysis::default(),
            &FillerAnalysis::default(),
        );
        assert_eq!(score.breakdown.format, 7);
    }

    #[test]
    fn test_language_score_floors_at_zero() {
        let fillers = FillerAnalysis {
            filler_count: 25,
            filler_words: vec![],
            has_too_many: true,
        };
        let score = calculate_score(
            &ContactInfo::default(),
            &sections_with(&[]),
            &VerbAnalysis::default(),
            &MetricsAnalysis::default(),
            &LengthAnalysis::default(),
            &FormattingIssues::default(),
            &BulletAnalysis::default(),
            &fillers,
        );
        assert_eq!(score.breakdown.language_quality, 0);
    }

    #[test]
    fn test_total_always_within_bounds() {
        let maxed_contacts = ContactInfo {
            emails: vec!["a@b.com".into()],
            phones: vec!["555-123-4567".into()],
            linkedin: vec!["linkedin.com/in/a".into()],
            github: vec!["github.com/a".into()],
            location: "Tunis".into(),
        };
        let all: Vec<&str> = crate::analysis::sections::SECTION_NAMES.to_vec();
        let score = calculate_score(
            &maxed_contacts,
            &sections_with(&all),
            &VerbAnalysis {
                strong_count: 50,
                ..VerbAnalysis::default()
            },
            &MetricsAnalysis {
                has_metrics: true,
                metrics_count: 50,
                examples: vec![],
            },
            &LengthAnalysis {
                word_count: 500,
                optimal: true,
                ..LengthAnalysis::default()
            },
            &FormattingIssues::default(),
            &BulletAnalysis {
                bullet_count: 8,
                has_bullets: true,
                avg_bullet_length: 15.0,
                optimal_length: true,
            },
            &FillerAnalysis::default(),
        );
        assert!(score.total <= 100);
        assert_eq!(score.level, ScoreLevel::Excellent);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ScoreLevel::from_score(100), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(80), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(79), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(60), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(59), ScoreLevel::Average);
        assert_eq!(ScoreLevel::from_score(40), ScoreLevel::Average);
        assert_eq!(ScoreLevel::from_score(39), ScoreLevel::NeedsImprovement);
        assert_eq!(ScoreLevel::from_score(0), ScoreLevel::NeedsImprovement);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(ScoreLevel::NeedsImprovement.label(), "Needs improvement");
        assert_eq!(ScoreLevel::Good.to_string(), "Good");
    }
}
