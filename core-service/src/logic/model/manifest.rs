//! Model Manifest - optional JSON sidecar next to the model file
//!
//! `models/model_anomalia.onnx` -> `models/model_anomalia.json`:
//!
//! ```json
//! { "name": "isolation-forest", "feature_names": ["f1", "f2", "f3"] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ModelError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub name: Option<String>,

    /// Ordered columns the model was fitted on
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl ModelManifest {
    pub fn sidecar_path(model_path: &Path) -> PathBuf {
        model_path.with_extension("json")
    }

    /// Load the sidecar if present. A missing sidecar is not an error;
    /// an unparsable one is.
    pub fn load_for(model_path: &Path) -> Result<Option<Self>, ModelError> {
        let path = Self::sidecar_path(model_path);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let manifest: Self = serde_json::from_str(&content)
            .map_err(|e| ModelError::Manifest(format!("{}: {}", path.display(), e)))?;

        Ok(Some(manifest))
    }
}
