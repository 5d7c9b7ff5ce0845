//! Classification reports

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use anomalia_core::{Classification, Dataset, FeatureSelection, InterfaceKind, SignalComparison};

/// Everything one classification run produced
#[derive(Debug)]
pub struct ClassificationRun {
    pub dataset: Dataset,
    pub classification: Classification,
    pub signal: Option<SignalComparison>,
}

impl ClassificationRun {
    pub fn latency_col(&self) -> Option<String> {
        self.signal.as_ref().map(|s| s.column.clone())
    }

    pub fn current_series(&self) -> Option<Vec<f64>> {
        self.signal.as_ref().map(|s| s.current.clone())
    }

    pub fn baseline_series(&self) -> Option<Vec<f64>> {
        self.signal.as_ref().and_then(|s| s.baseline.clone())
    }

    /// First rows with `_is_anomaly` / `_label` appended
    pub fn annotated_sample(&self, limit: usize) -> Vec<Map<String, Value>> {
        let mut rows = self.dataset.head_records(limit);
        for (i, row) in rows.iter_mut().enumerate() {
            let is_anomaly = self.classification.mask[i];
            row.insert("_is_anomaly".to_string(), Value::Bool(is_anomaly));
            row.insert(
                "_label".to_string(),
                Value::String(self.classification.labels[i].to_string()),
            );
        }
        rows
    }
}

/// `POST /upload` response
#[derive(Debug, Serialize)]
pub struct UploadReport {
    pub request_id: Uuid,
    /// Anomaly rate formatted with two decimals
    pub pct_anom: String,
    pub anomaly_rate: f64,
    pub alert: bool,
    pub threshold: f64,
    pub rows: usize,
    pub anomalies: usize,
    pub sample: Vec<Map<String, Value>>,
    pub latency_col: Option<String>,
    pub current_series: Option<Vec<f64>>,
    pub baseline_series: Option<Vec<f64>>,
    pub model_path: String,
    pub strategy: InterfaceKind,
    pub features: FeatureSelection,
}

impl UploadReport {
    pub fn new(request_id: Uuid, run: &ClassificationRun, threshold: f64, sample_rows: usize, model_path: String) -> Self {
        let classification = &run.classification;

        Self {
            request_id,
            pct_anom: format!("{:.2}", classification.anomaly_rate),
            anomaly_rate: classification.anomaly_rate,
            alert: classification.exceeds(threshold),
            threshold,
            rows: classification.row_count(),
            anomalies: classification.anomaly_count(),
            sample: run.annotated_sample(sample_rows),
            latency_col: run.latency_col(),
            current_series: run.current_series(),
            baseline_series: run.baseline_series(),
            model_path,
            strategy: classification.strategy,
            features: classification.features.clone(),
        }
    }
}

/// `POST /api/classify` response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub n_rows: usize,
    pub pct_anom: f64,
    pub labels: Vec<&'static str>,
    pub latency_col: Option<String>,
    pub current_series: Option<Vec<f64>>,
    pub baseline_series: Option<Vec<f64>>,
    pub sample: Vec<Map<String, Value>>,
}

impl ClassifyResponse {
    pub fn new(run: ClassificationRun, sample_rows: usize) -> Self {
        Self {
            n_rows: run.classification.row_count(),
            pct_anom: run.classification.anomaly_rate,
            latency_col: run.latency_col(),
            current_series: run.current_series(),
            baseline_series: run.baseline_series(),
            sample: run.dataset.head_records(sample_rows),
            labels: run.classification.labels,
        }
    }
}

/// `GET /api/status` response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub model_exists: bool,
    pub model_path: String,
    pub baseline_exists: bool,
    pub baseline_path: String,
    pub default_threshold: f64,
}
