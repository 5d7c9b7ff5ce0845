//! Anomalia Core
//!
//! Classifies rows of tabular telemetry as normal or anomalous with a
//! pre-trained outlier-detection model, and pairs a detected latency-like
//! column with a stored baseline.
//!
//! ```text
//! Dataset ──► select_features ──► Feature Matrix ──► score ──► Anomaly Mask
//!                   ▲                                  ▲            │
//!              ModelArtifact ──── ModelInterface ──────┘            ▼
//!                                                   rate, labels, alert
//! ```
//!
//! The core is synchronous and stateless: every call is a pure function
//! of its inputs, and a loaded [`ModelArtifact`] is only ever read.

pub mod constants;
pub mod logic;

pub use logic::classifier::{
    anomaly_rate, classify, compare_signal, detect_signal_column, load_baseline,
    pair_with_baseline, Classification, SignalComparison,
};
pub use logic::dataset::{Cell, Column, Dataset, DatasetError};
pub use logic::error::{ClassifyError, ErrorKind};
pub use logic::features::{select_features, FeatureSelection};
pub use logic::model::{
    score, should_alert, InterfaceKind, LabelPredictor, ModelArtifact, ModelCapabilities,
    ModelError, ModelInterface, ModelManifest, ModelMetadata, ScoreFunction,
};
