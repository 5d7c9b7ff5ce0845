//! Model / baseline status handler

use axum::{extract::State, Json};

use crate::models::StatusResponse;
use crate::AppState;

pub async fn get(State(state): State<AppState>) -> Json<StatusResponse> {
    let model_path = state.config.model_path();
    let baseline_path = state.config.baseline_path();

    Json(StatusResponse {
        model_exists: model_path.exists(),
        model_path: model_path.display().to_string(),
        baseline_exists: baseline_path.exists(),
        baseline_path: baseline_path.display().to_string(),
        default_threshold: state.config.alert_threshold,
    })
}
