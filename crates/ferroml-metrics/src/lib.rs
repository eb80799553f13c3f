pub mod classification;
pub mod regression;

pub use classification::accuracy;
pub use regression::{mse, r2_score};
