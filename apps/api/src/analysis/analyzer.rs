//! The analysis orchestrator — runs every pipeline stage in order over one
//! document and assembles the final result. One call is a pure, synchronous,
//! request-scoped computation: no shared mutable state, no I/O, no retries.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::analysis::contact::{self, ContactInfo};
use crate::analysis::format::{self, ExperienceDuration, FormattingIssues, LengthAnalysis};
use crate::analysis::quality::{
    self, BulletAnalysis, FillerAnalysis, MetricsAnalysis, SentenceAnalysis, VerbAnalysis,
};
use crate::analysis::recommend::{self, Priority, Recommendation};
use crate::analysis::scoring::{self, Score, ScoreLevel};
use crate::analysis::sections::{self, SectionMap};
use crate::extraction::Document;
use crate::linguistics::Linguistics;

/// Headline numbers of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_score: u32,
    pub level: ScoreLevel,
    pub critical_issues: usize,
    pub total_recommendations: usize,
}

/// The full output of one analysis call. Everything downstream (report,
/// export, improvement prompts) is a read-only projection of this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    pub score: Score,
    pub sections: SectionMap,
    pub sections_missing: Vec<String>,
    pub contacts: ContactInfo,
    pub recommendations: Vec<Recommendation>,
    pub verbs: VerbAnalysis,
    pub metrics: MetricsAnalysis,
    pub bullets: BulletAnalysis,
    pub fillers: FillerAnalysis,
    pub sentences: SentenceAnalysis,
    pub length: LengthAnalysis,
    pub formatting: FormattingIssues,
    pub experience_duration: ExperienceDuration,
}

impl AnalysisResult {
    pub fn high_priority(&self) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|rec| rec.priority == Priority::High)
            .collect()
    }

    pub fn medium_priority(&self) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|rec| rec.priority == Priority::Medium)
            .collect()
    }
}

/// One section handed off to the rewriting collaborator, with the findings
/// that make it worth rewriting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionToImprove {
    pub section: String,
    pub text: String,
    pub issues: Vec<String>,
    pub weak_verbs: Vec<String>,
    pub passive_verbs: Vec<String>,
}

/// The analysis pipeline. Holds the injected linguistic capability;
/// constructed once at startup and shared read-only across requests.
pub struct ResumeAnalyzer {
    linguistics: Arc<dyn Linguistics>,
}

impl ResumeAnalyzer {
    pub fn new(linguistics: Arc<dyn Linguistics>) -> Self {
        Self { linguistics }
    }

    /// Runs the full pipeline over extracted text. Total with respect to
    /// empty input: an empty document yields zero counts and a low (but
    /// in-range) score, never an error.
    pub fn analyze(&self, raw_text: &str) -> AnalysisResult {
        let document = Document::from_raw(raw_text.to_string());
        self.analyze_document(&document)
    }

    pub fn analyze_document(&self, document: &Document) -> AnalysisResult {
        let contacts = contact::extract_all(&document.normalized);
        let sections = sections::detect_sections(&document.raw);

        // Verb quality is judged on the experience section when one exists;
        // otherwise on the whole document.
        let experience_text = sections::extract_section_content(&document.raw, "experience");
        let verb_span = if experience_text.is_empty() {
            document.normalized.as_str()
        } else {
            experience_text.as_str()
        };
        let verbs = quality::analyze_verbs(verb_span, self.linguistics.as_ref());

        let metrics = quality::detect_quantifiable_achievements(&document.normalized);
        let bullets = quality::analyze_bullet_points(&document.raw);
        let fillers = quality::check_filler_words(&document.normalized);
        let sentences =
            quality::analyze_sentence_structure(&document.normalized, self.linguistics.as_ref());

        let length = format::analyze_length(&document.normalized);
        let formatting = format::check_formatting_issues(&document.raw);
        let experience_duration =
            format::extract_experience_duration(&document.normalized, Utc::now().year());

        let score = scoring::calculate_score(
            &contacts,
            &sections,
            &verbs,
            &metrics,
            &length,
            &formatting,
            &bullets,
            &fillers,
        );

        let recommendations = recommend::generate_recommendations(
            &contacts, &sections, &verbs, &metrics, &length, &fillers, &bullets,
        );

        let critical_issues = recommendations
            .iter()
            .filter(|rec| rec.priority == Priority::High)
            .count();

        AnalysisResult {
            summary: AnalysisSummary {
                total_score: score.total,
                level: score.level,
                critical_issues,
                total_recommendations: recommendations.len(),
            },
            sections_missing: sections.missing(),
            score,
            sections,
            contacts,
            recommendations,
            verbs,
            metrics,
            bullets,
            fillers,
            sentences,
            length,
            formatting,
            experience_duration,
        }
    }

    /// Derived view for the rewriting collaborator: the experience section,
    /// only when it exists and carries weak-verb findings.
    pub fn text_to_improve(
        &self,
        document: &Document,
        result: &AnalysisResult,
    ) -> Vec<SectionToImprove> {
        let experience_text = sections::extract_section_content(&document.raw, "experience");
        if experience_text.is_empty() || result.verbs.weak_count == 0 {
            return Vec::new();
        }

        vec![SectionToImprove {
            section: "experience".to_string(),
            text: experience_text,
            issues: vec![
                "Replace passive and weak verbs with action verbs".to_string(),
                "Add quantifiable results".to_string(),
            ],
            weak_verbs: result.verbs.weak_verbs.clone(),
            passive_verbs: result.verbs.passive_verbs.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistics::{HeuristicLinguistics, NoopLinguistics};

    const SAMPLE_RESUME: &str = "\
Jane Doe
jane.doe@example.com | 555-123-4567 | linkedin.com/in/janedoe
Tunis, Tunisia

Professional Summary
Backend engineer focused on reliability.

Work Experience
Acme Corp, 2018 - 2021
- Led migration of the billing platform serving 2 million users
- Reduced deploy time by 40% and optimized the build pipeline
Beta Ltd, 2021 - Present
- Delivered the payments API, improved latency by 30%

Education
MSc Computer Science, 2018

Technical Skills
Rust, PostgreSQL, Kubernetes
";

    fn analyzer() -> ResumeAnalyzer {
        ResumeAnalyzer::new(Arc::new(HeuristicLinguistics))
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analyzer = analyzer();
        let first = analyzer.analyze(SAMPLE_RESUME);
        let second = analyzer.analyze(SAMPLE_RESUME);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_within_bounds_for_sample() {
        let result = analyzer().analyze(SAMPLE_RESUME);
        assert!(result.score.total <= 100);
        assert!(result.score.breakdown.contact_info <= 10);
        assert!(result.score.breakdown.sections <= 15);
        assert!(result.score.breakdown.verb_quality <= 15);
        assert!(result.score.breakdown.quantifiable_achievements <= 20);
        assert!(result.score.breakdown.format <= 15);
        assert!(result.score.breakdown.bullet_points <= 10);
        assert!(result.score.breakdown.language_quality <= 10);
    }

    #[test]
    fn test_sample_resume_detects_structure() {
        let result = analyzer().analyze(SAMPLE_RESUME);
        assert!(result.sections.is_present("experience"));
        assert!(result.sections.is_present("education"));
        assert!(result.sections.is_present("skills"));
        assert!(result.sections_missing.contains(&"certifications".to_string()));
        assert!(result.contacts.has_email());
        assert!(result.contacts.has_linkedin());
        assert!(result.metrics.has_metrics);
        assert!(result.bullets.has_bullets);
    }

    #[test]
    fn test_empty_document_is_total() {
        let result = analyzer().analyze("");
        assert_eq!(result.length.word_count, 0);
        assert!(result.length.is_too_short);
        assert!(result.sections.0.values().all(|present| !present));
        assert_eq!(result.sections_missing.len(), 8);
        assert!(result.score.total <= 100);
        assert_eq!(result.summary.level, result.score.level);
    }

    #[test]
    fn test_summary_counts_match_recommendations() {
        let result = analyzer().analyze("just a very short note");
        assert_eq!(
            result.summary.total_recommendations,
            result.recommendations.len()
        );
        assert_eq!(result.summary.critical_issues, result.high_priority().len());
    }

    #[test]
    fn test_degraded_linguistics_still_analyzes() {
        let degraded = ResumeAnalyzer::new(Arc::new(NoopLinguistics));
        let result = degraded.analyze(SAMPLE_RESUME);
        assert_eq!(result.verbs.passive_count, 0);
        assert_eq!(result.sentences, SentenceAnalysis::default());
        // Parser-independent analyses are unaffected.
        assert!(result.verbs.strong_count > 0);
        assert!(result.metrics.has_metrics);
        assert!(result.score.total <= 100);
    }

    #[test]
    fn test_text_to_improve_selects_experience_with_weak_verbs() {
        let text = "\
Work Experience
I was responsible for the platform and worked on several tools.

Education
BSc, 2015
";
        let analyzer = analyzer();
        let document = Document::from_raw(text.to_string());
        let result = analyzer.analyze_document(&document);
        assert!(result.verbs.weak_count > 0);

        let to_improve = analyzer.text_to_improve(&document, &result);
        assert_eq!(to_improve.len(), 1);
        assert_eq!(to_improve[0].section, "experience");
        assert!(to_improve[0].text.contains("responsible for"));
        assert!(!to_improve[0].weak_verbs.is_empty());
    }

    #[test]
    fn test_text_to_improve_empty_without_experience_section() {
        let analyzer = analyzer();
        let document = Document::from_raw("Skills\nRust was used by me".to_string());
        let result = analyzer.analyze_document(&document);
        assert!(analyzer.text_to_improve(&document, &result).is_empty());
    }
}
