//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" while no model file is in place
    status: &'static str,
    model_ready: bool,
    version: &'static str,
    core_version: &'static str,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_ready = state.config.model_path().exists();

    Json(HealthResponse {
        status: if model_ready { "healthy" } else { "degraded" },
        model_ready,
        version: env!("CARGO_PKG_VERSION"),
        core_version: anomalia_core::constants::APP_VERSION,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
