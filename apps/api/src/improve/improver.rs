//! The improvement pipeline — feeds analysis findings into the rewriting
//! collaborator and assembles the generated sections into one result.
//!
//! Works against the `TextGenerator` trait so the whole pipeline is testable
//! with a canned generator.

use serde::Serialize;

use crate::analysis::analyzer::AnalysisResult;
use crate::analysis::sections;
use crate::errors::AppError;
use crate::extraction::Document;
use crate::improve::prompts::{
    BULLETS_PROMPT_TEMPLATE, EXPERIENCE_PROMPT_TEMPLATE, IMPROVER_SYSTEM, SKILLS_PROMPT_TEMPLATE,
    SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::{GenerationParams, TextGenerator};

/// Output language for the generated suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    /// Parses the `language` form field. Anything but `en`/`fr` is a
    /// validation error at the boundary.
    pub fn from_code(code: &str) -> Result<Self, AppError> {
        match code {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            other => Err(AppError::Validation(format!(
                "language must be 'en' or 'fr', got '{other}'"
            ))),
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            Language::En => "Respond in English",
            Language::Fr => "Réponds en français",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceImprovement {
    /// First 500 characters of the original, for side-by-side display.
    pub original_excerpt: String,
    pub improved: String,
    pub changes_made: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryImprovement {
    pub generated_summary: String,
    pub placement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsImprovement {
    pub original_excerpt: String,
    pub improved: String,
}

/// Everything the improver produced for one document. Absent fields mean the
/// corresponding rule did not apply (e.g. a summary already exists).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Improvements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceImprovement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<SummaryImprovement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillsImprovement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bullet_suggestions: Vec<String>,
}

/// Runs every applicable improvement over the analyzed document:
/// experience rewrite, summary generation when the section is absent,
/// skills reorganization, and bullet suggestions when bullets are scarce.
pub async fn improve_resume(
    document: &Document,
    analysis: &AnalysisResult,
    language: Language,
    generator: &dyn TextGenerator,
) -> Result<Improvements, AppError> {
    let mut improvements = Improvements::default();

    let experience_text = sections::extract_section_content(&document.raw, "experience");
    if !experience_text.is_empty() {
        tracing::debug!("improving experience section");
        improvements.experience = Some(
            improve_experience(&experience_text, analysis, language, generator).await?,
        );
    }

    if !analysis.sections.is_present("summary") {
        tracing::debug!("generating professional summary");
        improvements.professional_summary =
            Some(generate_summary(document, analysis, language, generator).await?);
    }

    let skills_text = sections::extract_section_content(&document.raw, "skills");
    if !skills_text.is_empty() {
        tracing::debug!("reorganizing skills section");
        improvements.skills = Some(improve_skills(&skills_text, language, generator).await?);
    }

    if analysis.bullets.bullet_count < 5 {
        tracing::debug!("generating bullet suggestions");
        let source = if experience_text.is_empty() {
            document.normalized.as_str()
        } else {
            experience_text.as_str()
        };
        improvements.bullet_suggestions =
            generate_bullet_suggestions(source, language, generator).await?;
    }

    Ok(improvements)
}

async fn improve_experience(
    text: &str,
    analysis: &AnalysisResult,
    language: Language,
    generator: &dyn TextGenerator,
) -> Result<ExperienceImprovement, AppError> {
    let mut verb_findings: Vec<String> = analysis.verbs.weak_verbs.clone();
    verb_findings.extend(analysis.verbs.passive_verbs.iter().cloned());

    let prompt = EXPERIENCE_PROMPT_TEMPLATE
        .replace("{text}", text)
        .replace(
            "{weak_verbs}",
            &truncate_chars(&verb_findings.join(", "), 100),
        )
        .replace(
            "{has_metrics}",
            if analysis.metrics.has_metrics {
                "Yes"
            } else {
                "No - MUST ADD"
            },
        )
        .replace("{language_instruction}", language.instruction());

    let improved = generator
        .generate(
            &prompt,
            IMPROVER_SYSTEM,
            GenerationParams {
                temperature: 0.7,
                max_tokens: 1500,
            },
        )
        .await?;

    let mut changes_made = vec!["Replaced weak verbs with action verbs".to_string()];
    changes_made.push(if analysis.metrics.has_metrics {
        "Enhanced metrics".to_string()
    } else {
        "Added quantifiable metrics".to_string()
    });
    changes_made.push("Improved bullet point structure".to_string());
    changes_made.push("Emphasized impact and results".to_string());

    Ok(ExperienceImprovement {
        original_excerpt: truncate_chars(text, 500),
        improved,
        changes_made,
    })
}

async fn generate_summary(
    document: &Document,
    analysis: &AnalysisResult,
    language: Language,
    generator: &dyn TextGenerator,
) -> Result<SummaryImprovement, AppError> {
    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{text}", &truncate_chars(&document.normalized, 1000))
        .replace(
            "{experience_years}",
            &analysis
                .experience_duration
                .total_experience_years
                .to_string(),
        )
        .replace("{language_instruction}", language.instruction());

    let generated = generator
        .generate(
            &prompt,
            IMPROVER_SYSTEM,
            GenerationParams {
                temperature: 0.8,
                max_tokens: 300,
            },
        )
        .await?;

    Ok(SummaryImprovement {
        generated_summary: generated,
        placement: "Add at the top of your CV, right after contact information".to_string(),
    })
}

async fn improve_skills(
    text: &str,
    language: Language,
    generator: &dyn TextGenerator,
) -> Result<SkillsImprovement, AppError> {
    let prompt = SKILLS_PROMPT_TEMPLATE
        .replace("{text}", text)
        .replace("{language_instruction}", language.instruction());

    let improved = generator
        .generate(
            &prompt,
            IMPROVER_SYSTEM,
            GenerationParams {
                temperature: 0.6,
                max_tokens: 800,
            },
        )
        .await?;

    Ok(SkillsImprovement {
        original_excerpt: truncate_chars(text, 300),
        improved,
    })
}

async fn generate_bullet_suggestions(
    text: &str,
    language: Language,
    generator: &dyn TextGenerator,
) -> Result<Vec<String>, AppError> {
    let prompt = BULLETS_PROMPT_TEMPLATE
        .replace("{text}", &truncate_chars(text, 800))
        .replace("{language_instruction}", language.instruction());

    let generated = generator
        .generate(
            &prompt,
            IMPROVER_SYSTEM,
            GenerationParams {
                temperature: 0.8,
                max_tokens: 500,
            },
        )
        .await?;

    Ok(parse_bullet_lines(&generated))
}

/// Keeps at most five non-empty, non-comment lines of generated output.
fn parse_bullet_lines(generated: &str) -> Vec<String> {
    generated
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .take(5)
        .collect()
}

/// Character-boundary-safe prefix of at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Renders the improvement run as a plain-text report.
pub fn render_improvement_report(analysis: &AnalysisResult, improvements: &Improvements) -> String {
    use std::fmt::Write;

    let rule = "================================================================================";
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "RESUME IMPROVEMENT REPORT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "INITIAL SCORE: {}/100 - {}",
        analysis.score.total, analysis.score.level
    );
    let _ = writeln!(out);

    let high = analysis.high_priority();
    if !high.is_empty() {
        let _ = writeln!(out, "Critical issues addressed:");
        for rec in high.iter().take(5) {
            let _ = writeln!(out, "  - {}", rec.issue);
        }
        let _ = writeln!(out);
    }

    if let Some(summary) = &improvements.professional_summary {
        let _ = writeln!(out, "PROFESSIONAL SUMMARY (new)");
        let _ = writeln!(out, "{}", summary.generated_summary);
        let _ = writeln!(out, "Placement: {}", summary.placement);
        let _ = writeln!(out);
    }

    if let Some(experience) = &improvements.experience {
        let _ = writeln!(out, "EXPERIENCE SECTION (improved)");
        let _ = writeln!(out, "Changes made:");
        for change in &experience.changes_made {
            let _ = writeln!(out, "  - {change}");
        }
        let _ = writeln!(out, "Improved text:");
        let _ = writeln!(out, "{}", experience.improved);
        let _ = writeln!(out);
    }

    if let Some(skills) = &improvements.skills {
        let _ = writeln!(out, "SKILLS SECTION (reorganized)");
        let _ = writeln!(out, "{}", skills.improved);
        let _ = writeln!(out);
    }

    if !improvements.bullet_suggestions.is_empty() {
        let _ = writeln!(out, "SUGGESTED BULLET POINTS");
        for (i, bullet) in improvements.bullet_suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {bullet}", i + 1);
        }
        let _ = writeln!(out);
    }

    let medium = analysis.medium_priority();
    if !medium.is_empty() {
        let _ = writeln!(out, "Next steps:");
        for (i, rec) in medium.iter().take(3).enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, rec.recommendation);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::ResumeAnalyzer;
    use crate::linguistics::HeuristicLinguistics;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Canned generator: echoes a fixed body regardless of prompt.
    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _params: GenerationParams,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn analyzed(text: &str) -> (Document, AnalysisResult) {
        let document = Document::from_raw(text.to_string());
        let analyzer = ResumeAnalyzer::new(Arc::new(HeuristicLinguistics));
        let result = analyzer.analyze_document(&document);
        (document, result)
    }

    const NO_SUMMARY_RESUME: &str = "\
Work Experience
I was responsible for internal tools at Acme, 2018 - 2021.

Technical Skills
Rust, SQL
";

    #[tokio::test]
    async fn test_improve_generates_summary_when_section_absent() {
        let (document, analysis) = analyzed(NO_SUMMARY_RESUME);
        let generator = CannedGenerator("A focused backend engineer.");
        let improvements = improve_resume(&document, &analysis, Language::En, &generator)
            .await
            .unwrap();
        let summary = improvements.professional_summary.expect("summary expected");
        assert_eq!(summary.generated_summary, "A focused backend engineer.");
        assert!(summary.placement.contains("top of your CV"));
    }

    #[tokio::test]
    async fn test_improve_skips_summary_when_present() {
        let text = "Professional Summary\nEngineer.\n\nWork Experience\nBuilt stuff, 2019 - 2021\n";
        let (document, analysis) = analyzed(text);
        let generator = CannedGenerator("irrelevant");
        let improvements = improve_resume(&document, &analysis, Language::En, &generator)
            .await
            .unwrap();
        assert!(improvements.professional_summary.is_none());
    }

    #[tokio::test]
    async fn test_improve_rewrites_experience_and_skills() {
        let (document, analysis) = analyzed(NO_SUMMARY_RESUME);
        let generator = CannedGenerator("- Rewritten content");
        let improvements = improve_resume(&document, &analysis, Language::En, &generator)
            .await
            .unwrap();

        let experience = improvements.experience.expect("experience expected");
        assert_eq!(experience.improved, "- Rewritten content");
        assert!(experience.original_excerpt.contains("responsible for"));
        assert!(experience
            .changes_made
            .iter()
            .any(|c| c.contains("quantifiable") || c.contains("metrics")));

        let skills = improvements.skills.expect("skills expected");
        assert!(skills.original_excerpt.contains("Rust"));
    }

    #[tokio::test]
    async fn test_improve_suggests_bullets_when_scarce() {
        let (document, analysis) = analyzed(NO_SUMMARY_RESUME);
        assert!(analysis.bullets.bullet_count < 5);
        let generator =
            CannedGenerator("- First bullet\n- Second bullet\n\n# header\n- Third bullet");
        let improvements = improve_resume(&document, &analysis, Language::En, &generator)
            .await
            .unwrap();
        assert_eq!(
            improvements.bullet_suggestions,
            vec!["- First bullet", "- Second bullet", "- Third bullet"]
        );
    }

    #[test]
    fn test_parse_bullet_lines_caps_at_five() {
        let generated = "1\n2\n3\n4\n5\n6\n7";
        assert_eq!(parse_bullet_lines(generated).len(), 5);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("en").unwrap(), Language::En);
        assert_eq!(Language::from_code("fr").unwrap(), Language::Fr);
        assert!(Language::from_code("de").is_err());
    }

    #[test]
    fn test_language_instructions() {
        assert_eq!(Language::En.instruction(), "Respond in English");
        assert!(Language::Fr.instruction().contains("français"));
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[tokio::test]
    async fn test_improvement_report_includes_generated_sections() {
        let (document, analysis) = analyzed(NO_SUMMARY_RESUME);
        let generator = CannedGenerator("Generated body");
        let improvements = improve_resume(&document, &analysis, Language::En, &generator)
            .await
            .unwrap();
        let report = render_improvement_report(&analysis, &improvements);
        assert!(report.contains("RESUME IMPROVEMENT REPORT"));
        assert!(report.contains(&format!("INITIAL SCORE: {}/100", analysis.score.total)));
        assert!(report.contains("PROFESSIONAL SUMMARY (new)"));
        assert!(report.contains("EXPERIENCE SECTION (improved)"));
    }
}
