use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is constructed once at startup and read-only afterwards,
/// so concurrent requests share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The analysis pipeline with its linguistic capability already injected.
    pub analyzer: Arc<ResumeAnalyzer>,
    /// LLM client for the improvement endpoints. `None` when no API key is
    /// configured — those endpoints then return 503.
    pub llm: Option<LlmClient>,
}
