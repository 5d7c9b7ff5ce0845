//! Request / response models

pub mod upload;
pub mod report;

pub use upload::*;
pub use report::*;
