//! Model Artifact - capability contracts and the resolved interface

use std::fmt;

use chrono::{DateTime, Utc};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::ModelError;

// ============================================================================
// CAPABILITY CONTRACTS
// ============================================================================

/// Model that predicts one discrete label per row
/// (e.g. `-1`/`+1` outlier detectors, `0`/`1` classifiers)
pub trait LabelPredictor: Send + Sync {
    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, ModelError>;
}

/// Model that returns one real-valued score per row.
/// Lower means more anomalous (decision function, log-likelihood).
pub trait ScoreFunction: Send + Sync {
    fn score(&self, features: ArrayView2<'_, f32>) -> Result<Vec<f64>, ModelError>;
}

// ============================================================================
// RESOLVED INTERFACE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    DiscreteLabeler,
    ContinuousScorer,
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceKind::DiscreteLabeler => write!(f, "discrete_labeler"),
            InterfaceKind::ContinuousScorer => write!(f, "continuous_scorer"),
        }
    }
}

pub enum ModelInterface {
    DiscreteLabeler(Box<dyn LabelPredictor>),
    ContinuousScorer(Box<dyn ScoreFunction>),
}

impl ModelInterface {
    pub fn kind(&self) -> InterfaceKind {
        match self {
            ModelInterface::DiscreteLabeler(_) => InterfaceKind::DiscreteLabeler,
            ModelInterface::ContinuousScorer(_) => InterfaceKind::ContinuousScorer,
        }
    }
}

impl fmt::Debug for ModelInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelInterface::{}", self.kind())
    }
}

/// Everything a loaded model can do, before an interface is chosen
#[derive(Default)]
pub struct ModelCapabilities {
    labels: Option<Box<dyn LabelPredictor>>,
    scores: Option<Box<dyn ScoreFunction>>,
}

impl ModelCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(mut self, predictor: impl LabelPredictor + 'static) -> Self {
        self.labels = Some(Box::new(predictor));
        self
    }

    pub fn with_scores(mut self, scorer: impl ScoreFunction + 'static) -> Self {
        self.scores = Some(Box::new(scorer));
        self
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    pub fn has_scores(&self) -> bool {
        self.scores.is_some()
    }

    /// Pick exactly one interface.
    /// Discrete labels win over scores: they carry the model's own
    /// decision boundary.
    pub fn resolve(self) -> Result<ModelInterface, ModelError> {
        match (self.labels, self.scores) {
            (Some(labels), _) => Ok(ModelInterface::DiscreteLabeler(labels)),
            (None, Some(scores)) => Ok(ModelInterface::ContinuousScorer(scores)),
            (None, None) => Err(ModelError::UnsupportedInterface),
        }
    }
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub interface: InterfaceKind,
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

/// A fitted model, read-only once built
#[derive(Debug)]
pub struct ModelArtifact {
    name: String,
    feature_names: Option<Vec<String>>,
    interface: ModelInterface,
    metadata: Option<ModelMetadata>,
}

impl ModelArtifact {
    pub fn new(name: impl Into<String>, capabilities: ModelCapabilities) -> Result<Self, ModelError> {
        let interface = capabilities.resolve()?;
        Ok(Self {
            name: name.into(),
            feature_names: None,
            interface,
            metadata: None,
        })
    }

    /// Declare the ordered feature columns the model was fitted on
    pub fn with_feature_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn interface(&self) -> &ModelInterface {
        &self.interface
    }

    pub fn kind(&self) -> InterfaceKind {
        self.interface.kind()
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }
}
