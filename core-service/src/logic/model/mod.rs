//! Model Module - Model Adapter
//!
//! Normalizes whatever a fitted model exposes (discrete labels or
//! continuous scores) into one scoring contract.
//! The interface is resolved once when the artifact is built, never probed
//! per call.

pub mod artifact;
pub mod inference;
pub mod manifest;
pub mod scoring;
pub mod threshold;


// Re-export common types
pub use artifact::{
    InterfaceKind, LabelPredictor, ModelArtifact, ModelCapabilities, ModelInterface,
    ModelMetadata, ScoreFunction,
};
pub use manifest::ModelManifest;
pub use scoring::score;
pub use threshold::{percentile, should_alert, SCORE_CUTOFF_PERCENTILE};

use thiserror::Error;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model manifest: {0}")]
    Manifest(String),

    #[error("Inference failed: {0}")]
    Runtime(String),

    #[error("Model returned {got} outputs for {expected} rows")]
    OutputLength { expected: usize, got: usize },

    #[error("Model does not expose a known prediction interface")]
    UnsupportedInterface,
}
