use ferroml_core::MatrixError;
use ferroml_preprocessing::PreprocessError;
use thiserror::Error;

/// Configuration and dimension failures, rejected before training starts.
/// Numeric degeneracies (zero-variance columns on the regression path, zero
/// label variance in R²) are not errors; they propagate as NaN/Infinity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainError {
    #[error("feature rows ({features}) do not match label rows ({labels})")]
    RowCountMismatch { features: usize, labels: usize },

    #[error("training set has no rows")]
    EmptyTrainingSet,

    #[error("batch size {batch_size} is invalid for {n_samples} samples")]
    InvalidBatchSize { batch_size: usize, n_samples: usize },

    #[error("learning rate must be positive, got {0}")]
    InvalidLearningRate(f64),

    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type TrainResult<T> = Result<T, TrainError>;
