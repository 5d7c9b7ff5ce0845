//! Configuration module

use std::env;
use std::path::PathBuf;

use anomalia_core::constants::{DEFAULT_BASELINE_FILE, DEFAULT_MODEL_FILE};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the model, its manifest and the baseline
    pub models_dir: PathBuf,

    /// Model file name inside `models_dir`
    pub model_file: String,

    /// Baseline CSV name inside `models_dir`
    pub baseline_file: String,

    /// Default alert threshold (percent of anomalous rows)
    pub alert_threshold: f64,

    /// Rows echoed back in the sample table
    pub sample_rows: usize,

    /// Upload size limit in bytes
    pub max_upload_bytes: usize,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,

    /// Emit JSON logs
    pub json_logs: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            models_dir: PathBuf::from("models"),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            baseline_file: DEFAULT_BASELINE_FILE.to_string(),
            alert_threshold: 5.0,
            sample_rows: 50,
            max_upload_bytes: 25 * 1024 * 1024,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            json_logs: false,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            models_dir: env::var("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.models_dir),

            model_file: env::var("MODEL_FILE")
                .unwrap_or(defaults.model_file),

            baseline_file: env::var("BASELINE_FILE")
                .unwrap_or(defaults.baseline_file),

            alert_threshold: env::var("ALERT_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.alert_threshold),

            sample_rows: env::var("SAMPLE_ROWS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.sample_rows),

            max_upload_bytes: env::var("MAX_UPLOAD_MB")
                .ok()
                .and_then(|mb| mb.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(defaults.max_upload_bytes),

            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or(defaults.cors_origins),

            json_logs: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    pub fn baseline_path(&self) -> PathBuf {
        self.models_dir.join(&self.baseline_file)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a:3000 ,,http://b:3000"),
            vec!["http://a:3000", "http://b:3000"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_paths_join_models_dir() {
        let config = Config {
            models_dir: PathBuf::from("/srv/models"),
            ..Default::default()
        };
        assert_eq!(config.model_path(), PathBuf::from("/srv/models/model_anomalia.onnx"));
        assert_eq!(config.baseline_path(), PathBuf::from("/srv/models/baseline.csv"));
        assert!(!config.is_production());
    }
}
