//! Read-only projections of an `AnalysisResult`: a human-readable text
//! report and a trimmed serializable export. Pure formatting — no new
//! computation happens here.

use std::fmt::Write;

use serde::Serialize;

use crate::analysis::analyzer::{AnalysisResult, AnalysisSummary};
use crate::analysis::contact::ContactInfo;
use crate::analysis::quality::{MetricsAnalysis, VerbAnalysis};
use crate::analysis::recommend::{Priority, Recommendation};
use crate::analysis::scoring::Score;
use crate::analysis::sections::SectionMap;

const RULE: &str = "============================================================";

/// Key statistics carried into the export projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportStatistics {
    pub verbs: VerbAnalysis,
    pub metrics: MetricsAnalysis,
    pub word_count: usize,
    pub estimated_pages: f64,
    pub experience_years: i32,
    pub bullet_points: usize,
}

/// Structured key-value export of one analysis — the shape returned by the
/// analyze endpoint and suitable for downstream integrations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisExport {
    pub summary: AnalysisSummary,
    pub score: Score,
    pub recommendations: Vec<Recommendation>,
    pub contacts: ContactInfo,
    pub sections: SectionMap,
    pub sections_missing: Vec<String>,
    pub high_priority_issues: Vec<Recommendation>,
    pub medium_priority_issues: Vec<Recommendation>,
    pub statistics: ExportStatistics,
}

pub fn export_summary(result: &AnalysisResult) -> AnalysisExport {
    AnalysisExport {
        summary: result.summary.clone(),
        score: result.score.clone(),
        recommendations: result.recommendations.clone(),
        contacts: result.contacts.clone(),
        sections: result.sections.clone(),
        sections_missing: result.sections_missing.clone(),
        high_priority_issues: result.high_priority().into_iter().cloned().collect(),
        medium_priority_issues: result.medium_priority().into_iter().cloned().collect(),
        statistics: ExportStatistics {
            verbs: result.verbs.clone(),
            metrics: result.metrics.clone(),
            word_count: result.length.word_count,
            estimated_pages: result.length.estimated_pages,
            experience_years: result.experience_duration.total_experience_years,
            bullet_points: result.bullets.bullet_count,
        },
    }
}

/// Renders the analysis as a plain-text report.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "RESUME ANALYSIS REPORT");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "OVERALL SCORE: {}/100 - {}",
        result.score.total, result.score.level
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Score breakdown:");
    for (label, points) in result.score.breakdown.entries() {
        let _ = writeln!(out, "  - {label}: {points} points");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Key statistics:");
    let _ = writeln!(out, "  - Word count: {}", result.length.word_count);
    let _ = writeln!(out, "  - Estimated pages: {}", result.length.estimated_pages);
    let _ = writeln!(
        out,
        "  - Years of experience: {}",
        result.experience_duration.total_experience_years
    );
    let _ = writeln!(out, "  - Strong action verbs: {}", result.verbs.strong_count);
    let _ = writeln!(
        out,
        "  - Quantifiable metrics: {}",
        result.metrics.metrics_count
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Sections detected:");
    for (section, present) in &result.sections.0 {
        let mark = if *present { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {section}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Contact information:");
    let _ = writeln!(out, "  - Emails: {} found", result.contacts.emails.len());
    let _ = writeln!(out, "  - Phones: {} found", result.contacts.phones.len());
    let location = if result.contacts.has_location() {
        result.contacts.location.as_str()
    } else {
        "not found"
    };
    let _ = writeln!(out, "  - Location: {location}");
    let _ = writeln!(
        out,
        "  - LinkedIn: {}",
        if result.contacts.has_linkedin() { "yes" } else { "no" }
    );
    let _ = writeln!(
        out,
        "  - GitHub: {}",
        if result.contacts.has_github() { "yes" } else { "no" }
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Recommendations:");
    write_priority_block(&mut out, "HIGH", result, Priority::High);
    write_priority_block(&mut out, "MEDIUM", result, Priority::Medium);
    write_priority_block(&mut out, "LOW", result, Priority::Low);

    let _ = writeln!(out, "{RULE}");
    out
}

fn write_priority_block(out: &mut String, label: &str, result: &AnalysisResult, wanted: Priority) {
    let matching: Vec<&Recommendation> = result
        .recommendations
        .iter()
        .filter(|rec| rec.priority == wanted)
        .collect();
    if matching.is_empty() {
        return;
    }

    let _ = writeln!(out, "  {label} priority:");
    for (i, rec) in matching.iter().enumerate() {
        let _ = writeln!(out, "    {}. [{}] {}", i + 1, rec.category, rec.issue);
        let _ = writeln!(out, "       -> {}", rec.recommendation);
    }
    let _ = writeln!(out);
}
