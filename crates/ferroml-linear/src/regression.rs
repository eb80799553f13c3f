use crate::fit::FitCore;
use ferroml_core::{Float, Matrix};
use ferroml_metrics::r2_score;
use ferroml_preprocessing::Standardizer;
use ferroml_train::{ResidualObjective, TrainConfig, TrainResult};

/// Ordinary linear regression fit by minibatch gradient descent.
///
/// Construction standardizes the features and caches the column moments;
/// `train` runs the epoch loop; `predict`/`test` reuse the cached moments so
/// unseen data goes through exactly the transform the model was trained on.
///
/// A zero-variance feature column is not guarded here: it standardizes to
/// NaN and poisons the fit. Remove constant columns before training.
#[derive(Debug, Clone)]
pub struct LinearRegressor<T: Float> {
    core: FitCore<T, ResidualObjective>,
}

impl<T: Float> LinearRegressor<T> {
    /// `labels` must be `(n_samples, 1)` continuous targets.
    pub fn new(features: &Matrix<T>, labels: Matrix<T>, config: TrainConfig<T>) -> TrainResult<Self> {
        let core = FitCore::new(features, labels, config, ResidualObjective, Standardizer::new())?;
        Ok(LinearRegressor { core })
    }

    pub fn train(&mut self) -> TrainResult<()> {
        self.core.train()
    }

    /// Continuous predictions, one row per observation.
    pub fn predict(&self, observations: &Matrix<T>) -> TrainResult<Matrix<T>> {
        self.core.project(observations)
    }

    /// Coefficient of determination on held-out data.
    ///
    /// Constant test labels make the denominator zero; the resulting
    /// NaN/-infinity is returned as-is.
    pub fn test(&self, test_features: &Matrix<T>, test_labels: &Matrix<T>) -> TrainResult<f64> {
        let predictions = self.core.project(test_features)?;
        Ok(r2_score(test_labels, &predictions))
    }

    /// Per-epoch training MSE, newest first.
    pub fn loss_history(&self) -> &[T] {
        self.core.loss_history()
    }

    /// Fitted weights, `(n_features + 1, 1)` with the bias term first.
    pub fn weights(&self) -> &Matrix<T> {
        self.core.weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ferroml_train::TrainError;

    /// y = 2*x1 + 3*x2, no noise.
    fn plane(xs: &[(f64, f64)]) -> (Matrix<f64>, Matrix<f64>) {
        let features = Matrix::from_rows(
            &xs.iter().map(|&(a, b)| vec![a, b]).collect::<Vec<_>>(),
        )
        .unwrap();
        let labels = Matrix::column_vector(
            &xs.iter().map(|&(a, b)| 2.0 * a + 3.0 * b).collect::<Vec<_>>(),
        );
        (features, labels)
    }

    const TRAIN_POINTS: &[(f64, f64)] = &[
        (1.0, 2.0),
        (2.0, 1.0),
        (3.0, 4.0),
        (4.0, 3.0),
        (5.0, 5.0),
        (6.0, 2.0),
        (7.0, 6.0),
        (8.0, 4.0),
    ];

    #[test]
    fn test_recovers_noiseless_plane() {
        let (x, y) = plane(TRAIN_POINTS);
        let config = TrainConfig::new(x.rows()).with_iterations(500);
        let mut model = LinearRegressor::new(&x, y, config).unwrap();
        model.train().unwrap();

        let (test_x, test_y) = plane(&[(1.5, 2.5), (4.5, 1.5), (6.5, 5.0)]);
        let r2 = model.test(&test_x, &test_y).unwrap();
        assert!(r2 >= 0.99, "r2 = {r2}");

        let pred = model.predict(&test_x).unwrap();
        assert_relative_eq!(pred.get(0, 0).unwrap(), 10.5, epsilon = 0.15);
    }

    #[test]
    fn test_first_epoch_reduces_mse() {
        let (x, y) = plane(TRAIN_POINTS);
        let config = TrainConfig::new(x.rows())
            .with_iterations(1)
            .with_learning_rate(0.01);
        let mut model = LinearRegressor::new(&x, y.clone(), config).unwrap();

        // loss of the zero-weight model is mean(y²)
        let initial: f64 = y.data().iter().map(|v| v * v).sum::<f64>() / y.rows() as f64;
        model.train().unwrap();
        let after = model.loss_history()[0];
        assert!(after < initial, "{after} should be below {initial}");
    }

    #[test]
    fn test_loss_history_grows_one_per_epoch() {
        let (x, y) = plane(TRAIN_POINTS);
        let config = TrainConfig::new(4).with_iterations(7);
        let mut model = LinearRegressor::new(&x, y, config).unwrap();
        model.train().unwrap();
        assert_eq!(model.loss_history().len(), 7);
    }

    #[test]
    fn test_construction_rejects_bad_input() {
        let (x, y) = plane(TRAIN_POINTS);

        let short_labels = y.slice_rows(0, 4).unwrap();
        assert!(matches!(
            LinearRegressor::new(&x, short_labels, TrainConfig::new(4)),
            Err(TrainError::RowCountMismatch { .. })
        ));

        assert!(matches!(
            LinearRegressor::new(&x, y.clone(), TrainConfig::new(0)),
            Err(TrainError::InvalidBatchSize { .. })
        ));

        assert!(matches!(
            LinearRegressor::new(&x, y, TrainConfig::new(100)),
            Err(TrainError::InvalidBatchSize { .. })
        ));

        let empty_x: Matrix<f64> = Matrix::zeros(0, 2);
        let empty_y: Matrix<f64> = Matrix::zeros(0, 1);
        assert!(matches!(
            LinearRegressor::new(&empty_x, empty_y, TrainConfig::new(1)),
            Err(TrainError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_zero_iterations_leaves_weights_at_zero() {
        let (x, y) = plane(TRAIN_POINTS);
        let config = TrainConfig::new(x.rows()).with_iterations(0);
        let mut model = LinearRegressor::new(&x, y, config).unwrap();
        model.train().unwrap();
        assert!(model.weights().data().iter().all(|&w| w == 0.0));
        assert!(model.loss_history().is_empty());
    }
}
