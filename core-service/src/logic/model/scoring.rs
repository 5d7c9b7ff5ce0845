//! Scoring - resolved interface output -> anomaly mask

use std::collections::BTreeSet;

use ndarray::ArrayView2;

use super::artifact::{ModelArtifact, ModelInterface};
use super::threshold::{percentile, SCORE_CUTOFF_PERCENTILE};
use super::ModelError;

/// Run the model on a feature matrix and turn its output into one
/// anomaly flag per row.
pub fn score(model: &ModelArtifact, features: ArrayView2<'_, f32>) -> Result<Vec<bool>, ModelError> {
    let rows = features.nrows();

    match model.interface() {
        ModelInterface::DiscreteLabeler(predictor) => {
            let labels = predictor.predict(features)?;
            check_length(rows, labels.len())?;
            log::debug!("Scored {} rows with discrete labels", rows);
            Ok(mask_from_labels(&labels))
        }
        ModelInterface::ContinuousScorer(scorer) => {
            let scores = scorer.score(features)?;
            check_length(rows, scores.len())?;
            log::debug!("Scored {} rows with continuous scores", rows);
            Ok(mask_from_scores(&scores))
        }
    }
}

/// `{-1, +1}` outlier convention: `-1` is anomalous.
/// Anything else is read as a 0/1 classifier: `1` is anomalous.
pub fn mask_from_labels(labels: &[i64]) -> Vec<bool> {
    let distinct: BTreeSet<i64> = labels.iter().copied().collect();
    let two_sided = distinct.iter().all(|l| *l == -1 || *l == 1);

    if two_sided {
        labels.iter().map(|l| *l == -1).collect()
    } else {
        labels.iter().map(|l| *l == 1).collect()
    }
}

/// Rows scoring strictly below the batch's 5th percentile are anomalous
pub fn mask_from_scores(scores: &[f64]) -> Vec<bool> {
    match percentile(scores, SCORE_CUTOFF_PERCENTILE) {
        Some(cutoff) => scores.iter().map(|s| *s < cutoff).collect(),
        None => Vec::new(),
    }
}

fn check_length(expected: usize, got: usize) -> Result<(), ModelError> {
    if expected != got {
        return Err(ModelError::OutputLength { expected, got });
    }
    Ok(())
}
