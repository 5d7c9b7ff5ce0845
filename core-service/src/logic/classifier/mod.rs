//! Anomaly Classifier
//!
//! Orchestrates feature selection, scoring and the aggregate rate.
//! Input: Dataset, ModelArtifact
//! Output: Classification (mask, rate, labels)

pub mod signal;
pub mod baseline;


pub use baseline::{compare_signal, load_baseline, pair_with_baseline, SignalComparison};
pub use signal::{detect_signal_column, SIGNAL_KEYWORDS};

use serde::Serialize;

use crate::constants::{ANOMALY_LABEL, NORMAL_LABEL};
use crate::logic::dataset::Dataset;
use crate::logic::error::ClassifyError;
use crate::logic::features::{build_matrix, first_missing, select_features, FeatureSelection};
use crate::logic::model::{score, should_alert, InterfaceKind, ModelArtifact};

// ============================================================================
// RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// One flag per dataset row, true = anomalous
    pub mask: Vec<bool>,
    /// Percent of anomalous rows (0 - 100)
    pub anomaly_rate: f64,
    /// "Anomalia" / "Normal" per row
    pub labels: Vec<&'static str>,
    pub features: FeatureSelection,
    pub strategy: InterfaceKind,
}

impl Classification {
    pub fn anomaly_count(&self) -> usize {
        self.mask.iter().filter(|a| **a).count()
    }

    pub fn row_count(&self) -> usize {
        self.mask.len()
    }

    /// Alert when the anomaly rate strictly exceeds `threshold` (percent)
    pub fn exceeds(&self, threshold: f64) -> bool {
        should_alert(self.anomaly_rate, threshold)
    }
}

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify every row of `dataset` with `model`.
///
/// Checks run in this order: no numeric columns, then no rows, then feature
/// selection, then missing values in the selected features. A header-only
/// file with no rows has untyped (numeric) columns, so it reports
/// `EmptyDataset`.
pub fn classify(dataset: &Dataset, model: &ModelArtifact) -> Result<Classification, ClassifyError> {
    let numeric: Vec<&str> = dataset
        .numeric_columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect();

    if numeric.is_empty() {
        return Err(ClassifyError::NoNumericColumns);
    }
    if dataset.is_empty() {
        return Err(ClassifyError::EmptyDataset);
    }

    let features = select_features(&numeric, model)?;
    if let Some((column, row)) = first_missing(dataset, &features) {
        return Err(ClassifyError::MissingFeatureValues { column, row });
    }

    let matrix = build_matrix(dataset, &features);
    let mask = score(model, matrix.view())?;

    let anomaly_rate = anomaly_rate(&mask);
    let labels = mask.iter().map(|a| label_for(*a)).collect();

    log::info!(
        "Classified {} rows with '{}' ({}): {:.2}% anomalous",
        mask.len(),
        model.name(),
        model.kind(),
        anomaly_rate
    );

    Ok(Classification {
        mask,
        anomaly_rate,
        labels,
        features,
        strategy: model.kind(),
    })
}

/// Percent of true entries; 0 for an empty mask
pub fn anomaly_rate(mask: &[bool]) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    let anomalies = mask.iter().filter(|a| **a).count();
    anomalies as f64 / mask.len() as f64 * 100.0
}

pub fn label_for(is_anomaly: bool) -> &'static str {
    if is_anomaly {
        ANOMALY_LABEL
    } else {
        NORMAL_LABEL
    }
}
