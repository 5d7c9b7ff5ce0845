//! Feature Matrix - dense model input

use ndarray::Array2;

use super::layout::FeatureSelection;
use crate::logic::dataset::Dataset;

/// First missing cell among the selected columns as `(column, row)`,
/// lowest row first. A selected column absent from the dataset counts as
/// missing from row 0.
pub fn first_missing(dataset: &Dataset, selection: &FeatureSelection) -> Option<(String, usize)> {
    selection
        .columns
        .iter()
        .filter_map(|name| {
            let row = match dataset.column(name) {
                Some(column) => column.first_missing()?,
                None => 0,
            };
            Some((name.clone(), row))
        })
        .min_by_key(|(_, row)| *row)
}

/// Project the selected columns into a `rows x features` matrix.
/// Callers reject missing cells first (see [`first_missing`]); any left
/// over become NaN.
pub fn build_matrix(dataset: &Dataset, selection: &FeatureSelection) -> Array2<f32> {
    let columns: Vec<_> = selection
        .columns
        .iter()
        .map(|name| dataset.column(name))
        .collect();

    Array2::from_shape_fn((dataset.row_count(), columns.len()), |(row, col)| {
        columns[col]
            .map(|c| c.feature_value(row))
            .unwrap_or(f32::NAN)
    })
}
