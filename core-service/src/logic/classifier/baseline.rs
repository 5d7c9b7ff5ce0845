//! Baseline comparison for the signal column
//!
//! Current and baseline series are extracted independently and compared in
//! aggregate only; rows are never aligned by index or timestamp.
//! Every baseline problem degrades to `baseline: None`.

use std::path::Path;

use serde::Serialize;

use super::signal::detect_signal_column;
use crate::logic::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalComparison {
    pub column: String,
    pub current: Vec<f64>,
    pub baseline: Option<Vec<f64>>,
}

/// Numeric values of `signal_column` from both datasets.
/// `baseline` is `None` when the baseline dataset is absent or lacks the column.
pub fn pair_with_baseline(
    dataset: &Dataset,
    baseline: Option<&Dataset>,
    signal_column: &str,
) -> SignalComparison {
    let current = dataset
        .column(signal_column)
        .map(|c| c.numeric_values())
        .unwrap_or_default();

    let baseline = baseline.and_then(|b| match b.column(signal_column) {
        Some(column) => Some(column.numeric_values()),
        None => {
            log::debug!("Baseline has no '{}' column", signal_column);
            None
        }
    });

    SignalComparison {
        column: signal_column.to_string(),
        current,
        baseline,
    }
}

/// Read a stored baseline CSV. Absent or unreadable files yield `None`.
pub fn load_baseline(path: &Path) -> Option<Dataset> {
    if !path.exists() {
        return None;
    }

    match Dataset::from_csv_path(path) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            log::warn!("Ignoring baseline {}: {}", path.display(), e);
            None
        }
    }
}

/// Detect the signal column and pair it with the stored baseline.
/// The baseline file is only read when a signal column exists.
pub fn compare_signal(dataset: &Dataset, baseline_path: &Path) -> Option<SignalComparison> {
    let names = dataset.column_names();
    let column = detect_signal_column(&names)?;

    let baseline = load_baseline(baseline_path);
    Some(pair_with_baseline(dataset, baseline.as_ref(), column))
}
