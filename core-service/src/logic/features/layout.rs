//! Feature Layout - which columns the model sees, in which order
//!
//! ## Rules
//! 1. Model declares feature names and all are present -> exactly those,
//!    in the model's order
//! 2. Any declared name missing -> every numeric column (degraded, not failed)
//! 3. No declared names -> every numeric column
//! 4. Empty selection -> `NoNumericFeatures`

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::logic::error::ClassifyError;
use crate::logic::model::ModelArtifact;

/// Resolved feature layout for one classification call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSelection {
    /// Column names in the order they are fed to the model
    pub columns: Vec<String>,
    /// True when declared features were missing and all numeric columns were used
    pub fallback: bool,
    /// Declared features absent from the dataset (empty unless `fallback`)
    pub missing: Vec<String>,
    /// CRC32 of the selected layout
    pub layout_hash: u32,
}

/// Compute CRC32 hash of an ordered feature layout
pub fn layout_hash<S: AsRef<str>>(columns: &[S]) -> u32 {
    let mut hasher = Hasher::new();
    for name in columns {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

/// Pick the model's input columns from the dataset's numeric columns
pub fn select_features<S: AsRef<str>>(
    numeric_columns: &[S],
    model: &ModelArtifact,
) -> Result<FeatureSelection, ClassifyError> {
    let available: Vec<&str> = numeric_columns.iter().map(AsRef::as_ref).collect();

    let (columns, missing): (Vec<String>, Vec<String>) = match model.feature_names() {
        Some(required) => {
            let missing: Vec<String> = required
                .iter()
                .filter(|name| !available.contains(&name.as_str()))
                .cloned()
                .collect();

            if missing.is_empty() {
                (required.to_vec(), missing)
            } else {
                log::warn!(
                    "Model '{}' expects features missing from the dataset ({}); falling back to all numeric columns",
                    model.name(),
                    missing.join(", ")
                );
                (available.iter().map(|s| s.to_string()).collect(), missing)
            }
        }
        None => (available.iter().map(|s| s.to_string()).collect(), Vec::new()),
    };

    if columns.is_empty() {
        return Err(ClassifyError::NoNumericFeatures);
    }

    Ok(FeatureSelection {
        layout_hash: layout_hash(&columns),
        fallback: !missing.is_empty(),
        missing,
        columns,
    })
}
