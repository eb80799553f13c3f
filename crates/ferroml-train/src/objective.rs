use ferroml_core::{Float, Matrix, MatrixResult};

/// Algorithm-specific pieces of the shared training loop: the gradient rule
/// applied per batch and the scalar loss recorded per epoch.
///
/// Both take standardized features (bias column included), labels of shape
/// `(n, n_outputs)` and weights of shape `(n_features + 1, n_outputs)`, and
/// both are hand-derived closed forms with no differentiation machinery
/// behind them.
pub trait Objective<T: Float> {
    /// Gradient of the loss with respect to the weights over one batch.
    /// Shape-compatible with the weight matrix.
    fn gradient(
        &self,
        features: &Matrix<T>,
        labels: &Matrix<T>,
        weights: &Matrix<T>,
    ) -> MatrixResult<Matrix<T>>;

    /// Monitored loss over the full training set, recorded once per epoch.
    fn loss(
        &self,
        features: &Matrix<T>,
        labels: &Matrix<T>,
        weights: &Matrix<T>,
    ) -> MatrixResult<T>;
}

/// Ordinary least squares: residual gradient, mean-squared-error monitor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidualObjective;

impl<T: Float> Objective<T> for ResidualObjective {
    /// `Xᵀ · (X·W - Y) / n`
    fn gradient(
        &self,
        features: &Matrix<T>,
        labels: &Matrix<T>,
        weights: &Matrix<T>,
    ) -> MatrixResult<Matrix<T>> {
        let residuals = features.matmul(weights)?.sub(labels)?;
        let gradient = features.transpose().matmul(&residuals)?;
        Ok(gradient.div_scalar(T::from_usize(features.rows())))
    }

    /// `sum((X·W - Y)²) / n`
    fn loss(
        &self,
        features: &Matrix<T>,
        labels: &Matrix<T>,
        weights: &Matrix<T>,
    ) -> MatrixResult<T> {
        let residuals = features.matmul(weights)?.sub(labels)?;
        let sum_sq = residuals.map(|r| r * r).sum();
        Ok(sum_sq / T::from_usize(features.rows()))
    }
}

/// Multinomial logistic regression: softmax gradient, cross-entropy monitor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftmaxObjective;

const LOG_EPSILON: f64 = 1e-7;

impl<T: Float> Objective<T> for SoftmaxObjective {
    /// `Xᵀ · (softmax(X·W) - Y) / n`, softmax taken row-wise over classes.
    fn gradient(
        &self,
        features: &Matrix<T>,
        labels: &Matrix<T>,
        weights: &Matrix<T>,
    ) -> MatrixResult<Matrix<T>> {
        let guesses = features.matmul(weights)?.softmax_rows();
        let differences = guesses.sub(labels)?;
        let gradient = features.transpose().matmul(&differences)?;
        Ok(gradient.div_scalar(T::from_usize(features.rows())))
    }

    /// Vectorized cross-entropy computed with a sigmoid activation:
    ///
    /// `-[Yᵀ·ln(σ(X·W) + ε) + (1-Y)ᵀ·ln(1 - σ(X·W) + ε)]₍₀,₀₎ / n`
    ///
    /// The gradient above uses softmax while this monitor uses sigmoid, and
    /// only element (0, 0) of the resulting class-by-class matrix is read.
    /// Do not "fix" either quirk: the learning-rate schedule only needs a
    /// consistent per-epoch signal, and this is the tracked one.
    fn loss(
        &self,
        features: &Matrix<T>,
        labels: &Matrix<T>,
        weights: &Matrix<T>,
    ) -> MatrixResult<T> {
        let eps = T::from_f64(LOG_EPSILON);
        let guesses = features.matmul(weights)?.sigmoid();

        let term_one = labels
            .transpose()
            .matmul(&guesses.map(|g| (g + eps).ln()))?;
        let term_two = labels
            .map(|y| T::ONE - y)
            .transpose()
            .matmul(&guesses.map(|g| (T::ONE - g + eps).ln()))?;

        let n = T::from_usize(features.rows());
        let cost = term_one.add(&term_two)?.div_scalar(n);
        Ok(-cost.get(0, 0).unwrap_or(T::ZERO))
    }
}
