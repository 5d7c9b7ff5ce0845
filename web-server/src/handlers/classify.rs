//! Classification handlers

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use anomalia_core::{classify, compare_signal, Dataset, ModelArtifact};

use crate::config::Config;
use crate::models::{ClassificationRun, ClassifyResponse, UploadForm, UploadReport};
use crate::{AppError, AppResult, AppState};

/// Classify an uploaded CSV and build the results report
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UploadReport>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("upload", %request_id);

    async move {
        let form = UploadForm::read(multipart).await?;
        let threshold = form.threshold.unwrap_or(state.config.alert_threshold);

        let dataset = Dataset::from_csv_bytes(&form.file)
            .map_err(|e| AppError::InvalidCsv(e.to_string()))?;

        let model_path = state.config.model_path();
        if !model_path.exists() {
            return Err(AppError::ModelNotFound(model_path.display().to_string()));
        }

        let run = run_blocking(state.config.clone(), dataset).await?;
        let report = UploadReport::new(
            request_id,
            &run,
            threshold,
            state.config.sample_rows,
            model_path.display().to_string(),
        );

        if report.alert {
            tracing::warn!(
                "Anomaly rate {}% above threshold {}%",
                report.pct_anom,
                threshold
            );
        }

        Ok(Json(report))
    }
    .instrument(span)
    .await
}

/// JSON API: labels, rate and signal series for an uploaded CSV
pub async fn api_classify(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("api_classify", %request_id);

    async move {
        let form = UploadForm::read(multipart).await?;
        let dataset = Dataset::from_csv_bytes(&form.file)
            .map_err(|e| AppError::InvalidCsv(e.to_string()))?;

        if !state.config.model_path().exists() {
            return Ok(Json(json!({ "error": "model not found" })).into_response());
        }

        let run = run_blocking(state.config.clone(), dataset).await?;
        Ok(Json(ClassifyResponse::new(run, state.config.sample_rows)).into_response())
    }
    .instrument(span)
    .await
}

/// Model loading and scoring are CPU bound: keep them off the async workers
async fn run_blocking(config: Config, dataset: Dataset) -> AppResult<ClassificationRun> {
    let span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        run_classification(&config, dataset)
    })
    .await?
}

/// Load the model (once per request), classify, pair the signal column
fn run_classification(config: &Config, dataset: Dataset) -> AppResult<ClassificationRun> {
    let model = ModelArtifact::load(&config.model_path())?;
    let classification = classify(&dataset, &model)?;
    let signal = compare_signal(&dataset, &config.baseline_path());

    if let Some(signal) = &signal {
        tracing::debug!(
            "Signal column '{}': {} current values, baseline {}",
            signal.column,
            signal.current.len(),
            if signal.baseline.is_some() { "loaded" } else { "absent" }
        );
    }

    Ok(ClassificationRun {
        dataset,
        classification,
        signal,
    })
}
