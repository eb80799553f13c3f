pub mod encode;
pub mod standardize;

pub use encode::{one_hot, one_hot_by_thresholds};
pub use standardize::{Moments, PreprocessError, PreprocessResult, Standardizer};
