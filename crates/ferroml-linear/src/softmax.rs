use crate::fit::FitCore;
use ferroml_core::{Float, Matrix};
use ferroml_metrics::accuracy;
use ferroml_preprocessing::Standardizer;
use ferroml_train::{SoftmaxObjective, TrainConfig, TrainResult};

/// Multinomial (softmax) logistic regression fit by minibatch gradient
/// descent.
///
/// Labels are one-hot rows, one column per class. Prediction returns the
/// arg-max class id per observation. The standardizer here fills
/// exactly-zero variances with 1, so constant feature columns (common in
/// sparse pixel data) stay at zero instead of turning into NaN.
#[derive(Debug, Clone)]
pub struct SoftmaxClassifier<T: Float> {
    core: FitCore<T, SoftmaxObjective>,
    decision_boundary: T,
}

impl<T: Float> SoftmaxClassifier<T> {
    /// `labels` must be `(n_samples, n_classes)` one-hot rows.
    pub fn new(features: &Matrix<T>, labels: Matrix<T>, config: TrainConfig<T>) -> TrainResult<Self> {
        let core = FitCore::new(
            features,
            labels,
            config,
            SoftmaxObjective,
            Standardizer::with_zero_variance_fill(),
        )?;
        Ok(SoftmaxClassifier {
            core,
            decision_boundary: T::from_f64(0.5),
        })
    }

    /// Probability cutoff reserved for thresholding a two-class model on
    /// its positive-class probability. Training and `test` ignore it.
    pub fn with_decision_boundary(mut self, decision_boundary: T) -> Self {
        self.decision_boundary = decision_boundary;
        self
    }

    pub fn decision_boundary(&self) -> T {
        self.decision_boundary
    }

    pub fn train(&mut self) -> TrainResult<()> {
        self.core.train()
    }

    /// Class probabilities, one row per observation, summing to one.
    pub fn predict_proba(&self, observations: &Matrix<T>) -> TrainResult<Matrix<T>> {
        Ok(self.core.project(observations)?.softmax_rows())
    }

    /// Most probable class id per observation.
    pub fn predict(&self, observations: &Matrix<T>) -> TrainResult<Vec<usize>> {
        Ok(self.predict_proba(observations)?.argmax_rows())
    }

    /// Classification accuracy against one-hot test labels.
    pub fn test(&self, test_features: &Matrix<T>, test_labels: &Matrix<T>) -> TrainResult<f64> {
        let predicted = self.predict(test_features)?;
        let actual = test_labels.argmax_rows();
        Ok(accuracy(&actual, &predicted))
    }

    /// Per-epoch training cross-entropy, newest first.
    pub fn loss_history(&self) -> &[T] {
        self.core.loss_history()
    }

    /// Fitted weights, `(n_features + 1, n_classes)` with bias terms in the
    /// first row.
    pub fn weights(&self) -> &Matrix<T> {
        self.core.weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferroml_preprocessing::one_hot;

    /// Two well-separated clusters in two dimensions.
    fn separable() -> (Matrix<f64>, Matrix<f64>, Vec<usize>) {
        let features = Matrix::from_rows(&[
            vec![0.0, 0.2],
            vec![0.4, 0.0],
            vec![0.1, 0.5],
            vec![0.5, 0.3],
            vec![5.0, 5.2],
            vec![5.4, 4.8],
            vec![4.9, 5.5],
            vec![5.2, 5.0],
        ])
        .unwrap();
        let classes = vec![0, 0, 0, 0, 1, 1, 1, 1];
        let labels = one_hot(&classes, 2);
        (features, labels, classes)
    }

    #[test]
    fn test_perfectly_separable_reaches_full_accuracy() {
        let (x, y, classes) = separable();
        let config = TrainConfig::new(x.rows())
            .with_learning_rate(0.5)
            .with_iterations(200);
        let mut model = SoftmaxClassifier::new(&x, y.clone(), config).unwrap();
        model.train().unwrap();

        let acc = model.test(&x, &y).unwrap();
        assert_eq!(acc, 1.0);
        assert_eq!(model.predict(&x).unwrap(), classes);
    }

    #[test]
    fn test_probabilities_are_distributions() {
        let (x, y, _) = separable();
        let config = TrainConfig::new(4).with_iterations(50);
        let mut model = SoftmaxClassifier::new(&x, y, config).unwrap();
        model.train().unwrap();

        let proba = model.predict_proba(&x).unwrap();
        for i in 0..proba.rows() {
            let sum: f64 = proba.row(i).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(proba.row(i).iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn test_constant_column_trains_without_nan() {
        let (x, y, _) = separable();
        // inject an all-constant feature column
        let constant = Matrix::from_rows(&vec![vec![3.0]; x.rows()]).unwrap();
        let x = x.hconcat(&constant).unwrap();

        let config = TrainConfig::new(x.rows()).with_iterations(100);
        let mut model = SoftmaxClassifier::new(&x, y.clone(), config).unwrap();
        model.train().unwrap();

        assert!(model.weights().data().iter().all(|w| w.is_finite()));
        assert!(model.loss_history().iter().all(|l| l.is_finite()));
        // the constant column carries no signal, so its weights stay zero
        assert_eq!(model.weights().get(3, 0), Some(0.0));
        assert_eq!(model.weights().get(3, 1), Some(0.0));
        assert_eq!(model.test(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_decision_boundary_is_carried() {
        let (x, y, _) = separable();
        let config = TrainConfig::new(x.rows()).with_iterations(1);
        let model = SoftmaxClassifier::new(&x, y, config)
            .unwrap()
            .with_decision_boundary(0.7);
        assert_eq!(model.decision_boundary(), 0.7);
    }

    #[test]
    fn test_cost_history_recorded_per_epoch() {
        let (x, y, _) = separable();
        let config = TrainConfig::new(x.rows()).with_iterations(5);
        let mut model = SoftmaxClassifier::new(&x, y, config).unwrap();
        model.train().unwrap();
        assert_eq!(model.loss_history().len(), 5);
        assert!(model.loss_history().iter().all(|l| *l > 0.0));
    }
}
