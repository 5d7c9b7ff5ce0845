//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the core and its callers.

/// Row label for anomalous rows
pub const ANOMALY_LABEL: &str = "Anomalia";

/// Row label for normal rows
pub const NORMAL_LABEL: &str = "Normal";

/// Default model file name inside the models directory
pub const DEFAULT_MODEL_FILE: &str = "model_anomalia.onnx";

/// Default baseline file name inside the models directory
pub const DEFAULT_BASELINE_FILE: &str = "baseline.csv";

/// Library version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
