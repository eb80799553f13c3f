use ferroml_core::{Float, Matrix, MatrixError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreprocessError {
    #[error("cannot fit a standardizer on a matrix with zero rows")]
    EmptyInput,

    #[error("standardizer used before fit")]
    NotFitted,

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type PreprocessResult<T> = Result<T, PreprocessError>;

/// Column statistics captured once from training features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Moments<T: Float> {
    /// `1 x n_features` column means.
    pub mean: Matrix<T>,
    /// `1 x n_features` column population variances (ddof = 0).
    pub variance: Matrix<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
enum ScalerState<T: Float> {
    Unfitted,
    Fitted(Moments<T>),
}

/// Standardizes features to zero mean and unit variance, then prepends a
/// bias column of ones.
///
/// The moments are captured from the first matrix passed to [`standardize`]
/// (the training features) and applied verbatim to every later matrix, so
/// training and inference see the same transform. Once fitted, a
/// standardizer never recomputes its statistics.
///
/// [`standardize`]: Standardizer::standardize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Standardizer<T: Float> {
    state: ScalerState<T>,
    fill_zero_variance: bool,
}

impl<T: Float> Standardizer<T> {
    /// A standardizer that stores variances exactly as computed. A
    /// zero-variance column will divide by zero and propagate NaN.
    pub fn new() -> Self {
        Standardizer {
            state: ScalerState::Unfitted,
            fill_zero_variance: false,
        }
    }

    /// A standardizer that replaces exactly-zero variances with 1 before
    /// caching. A constant column then standardizes to `0 / 1 = 0` instead
    /// of NaN, staying constant rather than poisoning the weights.
    pub fn with_zero_variance_fill() -> Self {
        Standardizer {
            state: ScalerState::Unfitted,
            fill_zero_variance: true,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ScalerState::Fitted(_))
    }

    pub fn moments(&self) -> Option<&Moments<T>> {
        match &self.state {
            ScalerState::Fitted(m) => Some(m),
            ScalerState::Unfitted => None,
        }
    }

    /// Capture column moments from `raw`. Errors if `raw` has no rows.
    pub fn fit(&mut self, raw: &Matrix<T>) -> PreprocessResult<()> {
        if raw.rows() == 0 {
            return Err(PreprocessError::EmptyInput);
        }
        let mean = raw.column_mean()?;
        let mut variance = raw.column_variance()?;
        if self.fill_zero_variance {
            variance = variance.map(|v| if v == T::ZERO { T::ONE } else { v });
        }
        self.state = ScalerState::Fitted(Moments { mean, variance });
        Ok(())
    }

    /// Apply the cached moments: `(x - mean) / sqrt(variance)`, then prepend
    /// a column of ones.
    pub fn transform(&self, raw: &Matrix<T>) -> PreprocessResult<Matrix<T>> {
        let moments = self.moments().ok_or(PreprocessError::NotFitted)?;
        let std_dev = moments.variance.map(T::sqrt);
        let scaled = raw.sub_row(&moments.mean)?.div_row(&std_dev)?;
        let bias = Matrix::ones(raw.rows(), 1);
        Ok(bias.hconcat(&scaled)?)
    }

    /// Fit on first use, then transform. Later calls reuse the cached
    /// moments unchanged.
    pub fn standardize(&mut self, raw: &Matrix<T>) -> PreprocessResult<Matrix<T>> {
        if !self.is_fitted() {
            self.fit(raw)?;
        }
        self.transform(raw)
    }
}

impl<T: Float> Default for Standardizer<T> {
    fn default() -> Self {
        Self::new()
    }
}
