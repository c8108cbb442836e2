use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status; reports whether the improver has an API key.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "analyzer": "ready",
        "improver": if state.llm.is_some() { "ready" } else { "missing_api_key" },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
