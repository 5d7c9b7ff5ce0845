//! Logic Module - Classification engine
//!
//! - `dataset/` - CSV materialization into typed columns
//! - `features/` - feature selection and the feature matrix
//! - `model/` - Model Adapter (ONNX backend, capability resolution, scoring)
//! - `classifier/` - Anomaly Classifier, signal heuristic, baseline pairing

pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod classifier;
