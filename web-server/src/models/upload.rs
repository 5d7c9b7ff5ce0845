//! Multipart upload form

use axum::extract::Multipart;

use crate::{AppError, AppResult};

/// `file` (CSV bytes) and an optional `threshold` field
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub file: Vec<u8>,
    pub threshold: Option<f64>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();
        let mut has_file = false;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    form.file_name = field.file_name().map(str::to_string);
                    form.file = field.bytes().await?.to_vec();
                    has_file = true;
                }
                Some("threshold") => {
                    let raw = field.text().await?;
                    form.threshold = Some(parse_threshold(&raw)?);
                }
                _ => {}
            }
        }

        if !has_file {
            return Err(AppError::ValidationError("No file uploaded".to_string()));
        }

        tracing::info!(
            "Received file: {} ({} bytes)",
            form.file_name.as_deref().unwrap_or("<unnamed>"),
            form.file.len()
        );

        Ok(form)
    }
}

fn parse_threshold(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| AppError::ValidationError(format!("Invalid threshold: '{}'", raw)))
}
