//! Classification errors
//!
//! Hard failures only. Soft degradations (feature fallback, missing
//! baseline) are flags and `Option`s on the success types.

use serde::Serialize;
use thiserror::Error;

use super::model::ModelError;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("No numeric columns found in CSV to classify.")]
    NoNumericColumns,

    #[error("No numeric features available for the model.")]
    NoNumericFeatures,

    #[error("Model does not expose a known prediction interface")]
    UnsupportedModelInterface,

    #[error("Dataset has no rows to classify.")]
    EmptyDataset,

    #[error("Input contains missing values: column '{column}', row {row}.")]
    MissingFeatureValues { column: String, row: usize },

    #[error(transparent)]
    Model(ModelError),
}

/// Stable error kind for callers that report failures as (kind, message)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoNumericColumns,
    NoNumericFeatures,
    UnsupportedModelInterface,
    EmptyDataset,
    MissingFeatureValues,
    Model,
}

impl ClassifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifyError::NoNumericColumns => ErrorKind::NoNumericColumns,
            ClassifyError::NoNumericFeatures => ErrorKind::NoNumericFeatures,
            ClassifyError::UnsupportedModelInterface => ErrorKind::UnsupportedModelInterface,
            ClassifyError::EmptyDataset => ErrorKind::EmptyDataset,
            ClassifyError::MissingFeatureValues { .. } => ErrorKind::MissingFeatureValues,
            ClassifyError::Model(_) => ErrorKind::Model,
        }
    }

    /// Input problems the caller can fix by sending a different file
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ClassifyError::NoNumericColumns
                | ClassifyError::NoNumericFeatures
                | ClassifyError::EmptyDataset
                | ClassifyError::MissingFeatureValues { .. }
        )
    }
}

impl From<ModelError> for ClassifyError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnsupportedInterface => ClassifyError::UnsupportedModelInterface,
            other => ClassifyError::Model(other),
        }
    }
}
