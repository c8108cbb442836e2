//! Axum route handlers for the Analysis API.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::report::{export_summary, render_report, AnalysisExport};
use crate::analysis::scoring::ScoreLevel;
use crate::errors::AppError;
use crate::extraction::{extract_text_from_pdf, Document};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub export: AnalysisExport,
    pub timestamp: String,
}

/// Pulls the uploaded PDF out of a multipart body and returns its bytes.
/// Used by the improvement handlers as well.
pub async fn read_pdf_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "uploaded file must be a PDF".to_string(),
            ));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }
        return Ok(data);
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/analyze
///
/// Extracts text from the uploaded PDF, runs the full analysis pipeline and
/// returns the structured export projection.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let data = read_pdf_field(&mut multipart).await?;
    let raw_text = extract_text_from_pdf(&data)?;

    let result = state.analyzer.analyze(&raw_text);
    info!(
        score = result.score.total,
        level = %result.score.level,
        "analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        export: export_summary(&result),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// POST /api/v1/analyze/report
///
/// Same pipeline as `/analyze`, rendered as a plain-text report.
pub async fn handle_analyze_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String, AppError> {
    let data = read_pdf_field(&mut multipart).await?;
    let raw_text = extract_text_from_pdf(&data)?;

    let document = Document::from_raw(raw_text);
    let result = state.analyzer.analyze_document(&document);
    Ok(render_report(&result))
}

/// GET /api/v1/recommendations/:score
///
/// Generic improvement tips for a given score, without a document. Level
/// thresholds come from `ScoreLevel::from_score` — the same table the
/// analyzer uses.
pub async fn handle_recommendations_by_score(
    Path(score): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !(0..=100).contains(&score) {
        return Err(AppError::Validation(
            "score must be between 0 and 100".to_string(),
        ));
    }

    let level = ScoreLevel::from_score(score as u32);
    let tips: &[&str] = match level {
        ScoreLevel::Excellent => &[
            "Your resume is high quality",
            "Keep it up to date",
            "Tailor it for each application",
        ],
        ScoreLevel::Good => &[
            "Add more quantifiable results",
            "Strengthen your action verbs",
            "Check formatting consistency",
        ],
        ScoreLevel::Average => &[
            "Restructure your main sections",
            "Add concrete metrics",
            "Use strong action verbs",
            "Check your contact information",
        ],
        ScoreLevel::NeedsImprovement => &[
            "Add all essential sections",
            "Complete your contact information",
            "Use bullet points for achievements",
            "Quantify your accomplishments",
            "Avoid passive verbs",
        ],
    };

    Ok(Json(json!({
        "score": score,
        "level": level,
        "recommendations": tips,
    })))
}
