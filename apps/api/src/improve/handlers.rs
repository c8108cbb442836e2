//! Axum route handlers for the Improvement API. These endpoints need the
//! LLM client; without an API key they return 503 and the analysis
//! endpoints keep working.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::analysis::analyzer::SectionToImprove;
use crate::analysis::report::{export_summary, AnalysisExport};
use crate::errors::AppError;
use crate::extraction::{extract_text_from_pdf, Document};
use crate::improve::improver::{improve_resume, render_improvement_report, Improvements, Language};
use crate::llm_client::LlmClient;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImprovementResponse {
    pub success: bool,
    pub original_score: u32,
    pub level: String,
    pub improvements: Improvements,
    /// Sections flagged for rewriting, with their findings — the hand-off
    /// view integrators can feed to their own rewriting backend.
    pub sections_to_improve: Vec<SectionToImprove>,
    pub report: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct FullProcessResponse {
    pub success: bool,
    pub analysis: AnalysisExport,
    pub improvements: Improvements,
    pub report: String,
    pub timestamp: String,
}

struct ImproveUpload {
    data: Bytes,
    language: Language,
}

/// Reads the `file` and optional `language` fields (default: English).
async fn read_improve_upload(mut multipart: Multipart) -> Result<ImproveUpload, AppError> {
    let mut data: Option<Bytes> = None;
    let mut language = Language::En;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if !filename.to_lowercase().ends_with(".pdf") {
                    return Err(AppError::Validation(
                        "uploaded file must be a PDF".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                data = Some(bytes);
            }
            Some("language") => {
                let code = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid language field: {e}")))?;
                language = Language::from_code(code.trim())?;
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| {
        AppError::Validation("multipart field 'file' is required".to_string())
    })?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    Ok(ImproveUpload { data, language })
}

fn require_llm(state: &AppState) -> Result<&LlmClient, AppError> {
    state.llm.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable(
            "improvement service unavailable: missing LLM API key".to_string(),
        )
    })
}

/// POST /api/v1/improve
///
/// Analysis + LLM rewriting of the weak sections, in one request.
pub async fn handle_improve(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImprovementResponse>, AppError> {
    let llm = require_llm(&state)?.clone();
    let upload = read_improve_upload(multipart).await?;

    let raw_text = extract_text_from_pdf(&upload.data)?;
    let document = Document::from_raw(raw_text);
    let analysis = state.analyzer.analyze_document(&document);
    info!(
        score = analysis.score.total,
        critical = analysis.summary.critical_issues,
        "analysis complete, starting improvement"
    );

    let improvements = improve_resume(&document, &analysis, upload.language, &llm).await?;
    let report = render_improvement_report(&analysis, &improvements);
    let sections_to_improve = state.analyzer.text_to_improve(&document, &analysis);

    Ok(Json(ImprovementResponse {
        success: true,
        original_score: analysis.score.total,
        level: analysis.score.level.to_string(),
        improvements,
        sections_to_improve,
        report,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// POST /api/v1/full-process
///
/// Full pipeline in one request: analysis export plus improvements.
pub async fn handle_full_process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FullProcessResponse>, AppError> {
    let llm = require_llm(&state)?.clone();
    let upload = read_improve_upload(multipart).await?;

    let raw_text = extract_text_from_pdf(&upload.data)?;
    let document = Document::from_raw(raw_text);
    let analysis = state.analyzer.analyze_document(&document);

    let improvements = improve_resume(&document, &analysis, upload.language, &llm).await?;
    let report = render_improvement_report(&analysis, &improvements);

    Ok(Json(FullProcessResponse {
        success: true,
        analysis: export_summary(&analysis),
        improvements,
        report,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
