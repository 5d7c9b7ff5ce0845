//! Features Module - Feature Matrix construction
//!
//! Chooses which numeric columns feed the model and projects the dataset
//! into a dense `rows x features` matrix.

pub mod layout;
pub mod matrix;


// Re-export common types
pub use layout::{layout_hash, select_features, FeatureSelection};
pub use matrix::{build_matrix, first_missing};
