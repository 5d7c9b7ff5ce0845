//! Thresholds
//!
//! Percentile cutoff for score-only models and the alert decision on the
//! aggregate anomaly rate.

/// Scores below this percentile of the batch are anomalous.
/// Approximates a 5% contamination assumption.
pub const SCORE_CUTOFF_PERCENTILE: f64 = 5.0;

/// Percentile with linear interpolation between the closest ranks.
///
/// Returns `None` for an empty slice and NaN when any value is NaN,
/// so a NaN cutoff never marks a row as anomalous.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Alert when the anomaly rate (percent) strictly exceeds the threshold
pub fn should_alert(anomaly_rate: f64, threshold: f64) -> bool {
    anomaly_rate > threshold
}
