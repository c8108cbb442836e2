pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::improve::handlers as improve_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis_handlers::handle_analyze))
        .route(
            "/api/v1/analyze/report",
            post(analysis_handlers::handle_analyze_report),
        )
        .route(
            "/api/v1/recommendations/:score",
            get(analysis_handlers::handle_recommendations_by_score),
        )
        // Improvement API (requires an LLM API key)
        .route("/api/v1/improve", post(improve_handlers::handle_improve))
        .route(
            "/api/v1/full-process",
            post(improve_handlers::handle_full_process),
        )
        .with_state(state)
}
