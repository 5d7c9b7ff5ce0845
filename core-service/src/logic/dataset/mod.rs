//! Dataset Module - Tabular input for classification
//!
//! Materializes uploaded / stored CSV files into a column-major table.
//! Every cell is typed once at parse time so the classifier never has to
//! re-parse strings.

pub mod table;
pub mod reader;


pub use table::{Cell, Column, Dataset};

use thiserror::Error;

/// Dataset materialization errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Column '{name}' has {got} rows, expected {expected}")]
    RaggedColumns {
        name: String,
        expected: usize,
        got: usize,
    },
}
