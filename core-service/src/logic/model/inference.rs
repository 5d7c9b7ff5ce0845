//! Inference Engine - ONNX Runtime Integration
//!
//! Loads an ONNX export of a fitted model (e.g. an sklearn IsolationForest
//! converted with skl2onnx) and exposes its graph outputs as capabilities:
//! - integer tensor output -> discrete labels
//! - float tensor output   -> continuous scores

use std::path::Path;
use std::sync::Arc;

use ndarray::{Array2, ArrayView2};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::tensor::TensorElementType;
use ort::value::{Value, ValueType};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use super::artifact::{LabelPredictor, ModelArtifact, ModelCapabilities, ModelMetadata, ScoreFunction};
use super::manifest::ModelManifest;
use super::ModelError;

/// Preferred output names for the label capability
const LABEL_OUTPUTS: &[&str] = &["label", "labels", "predict"];

/// Preferred output names for the score capability, in priority order
const SCORE_OUTPUTS: &[&str] = &["scores", "decision_function", "score_samples", "log_likelihood"];

// ============================================================================
// SESSION
// ============================================================================

/// ONNX session shared by the capabilities of one model.
/// `Session::run` needs exclusive access.
struct OnnxSession {
    session: Mutex<Session>,
}

impl OnnxSession {
    /// Run the graph and copy one output out of the runtime
    fn run<T, F>(&self, features: ArrayView2<'_, f32>, output: &str, extract: F) -> Result<Vec<T>, ModelError>
    where
        F: FnOnce(&ort::value::DynValue) -> Result<Vec<T>, ModelError>,
    {
        let input: Array2<f32> = features.to_owned();
        let input_tensor = Value::from_array(input)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Runtime(format!("Inference failed: {}", e)))?;

        let value = outputs
            .get(output)
            .ok_or_else(|| ModelError::Runtime(format!("No output '{}'", output)))?;

        extract(value)
    }
}

/// Keep the first value of each row when the output is `[rows, k]`
fn first_per_row<T: Copy>(data: &[T], rows: usize) -> Result<Vec<T>, ModelError> {
    if rows == 0 || data.len() == rows {
        return Ok(data.to_vec());
    }
    if data.len() % rows != 0 {
        return Err(ModelError::OutputLength { expected: rows, got: data.len() });
    }

    let stride = data.len() / rows;
    Ok(data.iter().step_by(stride).copied().collect())
}

// ============================================================================
// CAPABILITIES
// ============================================================================

struct OnnxLabels {
    session: Arc<OnnxSession>,
    output: String,
    element: TensorElementType,
}

impl LabelPredictor for OnnxLabels {
    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, ModelError> {
        let rows = features.nrows();
        let element = self.element;

        self.session.run(features, &self.output, |value| {
            let labels: Vec<i64> = match element {
                TensorElementType::Int32 => {
                    let (_, data) = value
                        .try_extract_tensor::<i32>()
                        .map_err(|e| ModelError::Runtime(format!("Extract error: {}", e)))?;
                    data.iter().map(|v| i64::from(*v)).collect()
                }
                _ => {
                    let (_, data) = value
                        .try_extract_tensor::<i64>()
                        .map_err(|e| ModelError::Runtime(format!("Extract error: {}", e)))?;
                    data.to_vec()
                }
            };
            first_per_row(&labels, rows)
        })
    }
}

struct OnnxScores {
    session: Arc<OnnxSession>,
    output: String,
    element: TensorElementType,
}

impl ScoreFunction for OnnxScores {
    fn score(&self, features: ArrayView2<'_, f32>) -> Result<Vec<f64>, ModelError> {
        let rows = features.nrows();
        let element = self.element;

        self.session.run(features, &self.output, |value| {
            let scores: Vec<f64> = match element {
                TensorElementType::Float64 => {
                    let (_, data) = value
                        .try_extract_tensor::<f64>()
                        .map_err(|e| ModelError::Runtime(format!("Extract error: {}", e)))?;
                    data.to_vec()
                }
                _ => {
                    let (_, data) = value
                        .try_extract_tensor::<f32>()
                        .map_err(|e| ModelError::Runtime(format!("Extract error: {}", e)))?;
                    data.iter().map(|v| f64::from(*v)).collect()
                }
            };
            first_per_row(&scores, rows)
        })
    }
}

/// Choose an output: a preferred name first, otherwise the first candidate
fn pick_output(candidates: &[(String, TensorElementType)], preferred: &[&str]) -> Option<(String, TensorElementType)> {
    preferred
        .iter()
        .find_map(|name| candidates.iter().find(|(n, _)| n == name))
        .or_else(|| candidates.first())
        .cloned()
}

/// Probe the graph outputs once and wrap them as capabilities
fn probe_capabilities(session: Session) -> ModelCapabilities {
    let mut int_outputs = Vec::new();
    let mut float_outputs = Vec::new();

    for output in &session.outputs {
        if let ValueType::Tensor { ty, .. } = &output.output_type {
            match ty {
                TensorElementType::Int64 | TensorElementType::Int32 => {
                    int_outputs.push((output.name.clone(), *ty));
                }
                TensorElementType::Float32 | TensorElementType::Float64 => {
                    float_outputs.push((output.name.clone(), *ty));
                }
                _ => {}
            }
        }
    }

    let shared = Arc::new(OnnxSession {
        session: Mutex::new(session),
    });

    let mut capabilities = ModelCapabilities::new();

    if let Some((output, element)) = pick_output(&int_outputs, LABEL_OUTPUTS) {
        log::debug!("ONNX label output: {} ({:?})", output, element);
        capabilities = capabilities.with_labels(OnnxLabels {
            session: Arc::clone(&shared),
            output,
            element,
        });
    }

    if let Some((output, element)) = pick_output(&float_outputs, SCORE_OUTPUTS) {
        log::debug!("ONNX score output: {} ({:?})", output, element);
        capabilities = capabilities.with_scores(OnnxScores {
            session: shared,
            output,
            element,
        });
    }

    capabilities
}

// ============================================================================
// LOADING
// ============================================================================

fn open_session(bytes: &[u8]) -> Result<Session, ModelError> {
    Session::builder()
        .map_err(|e| ModelError::Runtime(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ModelError::Runtime(format!("Failed to set optimization: {}", e)))?
        .commit_from_memory(bytes)
        .map_err(|e| ModelError::Runtime(format!("Failed to load model: {}", e)))
}

impl ModelArtifact {
    /// Load an ONNX model and its optional JSON sidecar manifest
    pub fn load(model_path: &Path) -> Result<Self, ModelError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ModelError::NotFound(model_path.display().to_string()));
        }

        let bytes = std::fs::read(model_path)?;
        let checksum = hex::encode(Sha256::digest(&bytes));

        let session = open_session(&bytes)?;

        let manifest = ModelManifest::load_for(model_path)?.unwrap_or_default();
        let name = manifest.name.clone().unwrap_or_else(|| {
            model_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string())
        });

        let mut artifact = ModelArtifact::new(name, probe_capabilities(session))?;
        if let Some(names) = manifest.feature_names {
            artifact = artifact.with_feature_names(names);
        }

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            interface: artifact.kind(),
            checksum,
            loaded_at: chrono::Utc::now(),
        };

        log::info!(
            "ONNX model loaded successfully ({}, sha256 {})",
            metadata.interface,
            &metadata.checksum[..12]
        );

        Ok(artifact.with_metadata(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// `label = f1 > 25 ? -1 : 1`, `scores = 25 - f1`, both `[N, 1]`
    fn fixture_bytes() -> Vec<u8> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/threshold_model.onnx");
        std::fs::read(path).unwrap()
    }

    fn fixture_session() -> Arc<OnnxSession> {
        Arc::new(OnnxSession {
            session: Mutex::new(open_session(&fixture_bytes()).unwrap()),
        })
    }

    #[test]
    fn test_probe_finds_label_and_score_outputs() {
        let session = open_session(&fixture_bytes()).unwrap();
        let capabilities = probe_capabilities(session);

        assert!(capabilities.has_labels());
        assert!(capabilities.has_scores());
    }

    #[test]
    fn test_onnx_labels_flatten_column_output() {
        let labels = OnnxLabels {
            session: fixture_session(),
            output: "label".to_string(),
            element: TensorElementType::Int64,
        };
        let x = array![[1.0f32, 0.0, 0.0], [30.0, 0.0, 0.0], [25.0, 7.0, 7.0]];

        assert_eq!(labels.predict(x.view()).unwrap(), vec![1, -1, 1]);
    }

    #[test]
    fn test_onnx_scores_flatten_column_output() {
        let scores = OnnxScores {
            session: fixture_session(),
            output: "scores".to_string(),
            element: TensorElementType::Float32,
        };
        let x = array![[1.0f32, 0.0, 0.0], [30.0, 0.0, 0.0]];

        assert_eq!(scores.score(x.view()).unwrap(), vec![24.0, -5.0]);
    }

    #[test]
    fn test_first_per_row() {
        assert_eq!(first_per_row(&[1, 2, 3], 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(first_per_row(&[1.0, 9.0, 2.0, 9.0], 2).unwrap(), vec![1.0, 2.0]);
        assert!(matches!(
            first_per_row(&[1, 2, 3], 2),
            Err(ModelError::OutputLength { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_pick_output_prefers_known_names() {
        let outputs = vec![
            ("probabilities".to_string(), TensorElementType::Float32),
            ("scores".to_string(), TensorElementType::Float32),
        ];
        let (name, _) = pick_output(&outputs, SCORE_OUTPUTS).unwrap();
        assert_eq!(name, "scores");

        let (name, _) = pick_output(&outputs[..1], SCORE_OUTPUTS).unwrap();
        assert_eq!(name, "probabilities");

        assert!(pick_output(&[], LABEL_OUTPUTS).is_none());
    }

    #[test]
    fn test_load_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelArtifact::load(&dir.path().join("model_anomalia.onnx"));
        assert!(matches!(result, Err(ModelError::NotFound(_))));
    }
}
