use ferroml_core::{Float, Matrix};
use ferroml_preprocessing::Standardizer;
use ferroml_train::{run_epoch, LossTracker, Objective, TrainConfig, TrainError, TrainResult};

/// Shared body of both estimators: owns the standardized training data, the
/// weights, the loss history and the current learning rate, and drives the
/// epoch loop. The estimators differ only in their [`Objective`] and in how
/// they turn projections into predictions and scores.
///
/// One instance serves one training run. The standardizer's moments are
/// captured here, at construction, and every later projection reuses them.
#[derive(Debug, Clone)]
pub(crate) struct FitCore<T: Float, O: Objective<T>> {
    features: Matrix<T>,
    labels: Matrix<T>,
    weights: Matrix<T>,
    standardizer: Standardizer<T>,
    tracker: LossTracker<T>,
    learning_rate: T,
    config: TrainConfig<T>,
    objective: O,
}

impl<T: Float, O: Objective<T>> FitCore<T, O> {
    pub(crate) fn new(
        raw_features: &Matrix<T>,
        labels: Matrix<T>,
        config: TrainConfig<T>,
        objective: O,
        mut standardizer: Standardizer<T>,
    ) -> TrainResult<Self> {
        let n_samples = raw_features.rows();
        if n_samples == 0 {
            return Err(TrainError::EmptyTrainingSet);
        }
        if labels.rows() != n_samples {
            return Err(TrainError::RowCountMismatch {
                features: n_samples,
                labels: labels.rows(),
            });
        }
        config.validate(n_samples)?;

        let features = standardizer.standardize(raw_features)?;
        let weights = Matrix::zeros(features.cols(), labels.cols());

        Ok(FitCore {
            features,
            labels,
            weights,
            standardizer,
            tracker: LossTracker::new(),
            learning_rate: config.learning_rate,
            config,
            objective,
        })
    }

    /// Run the configured number of epochs. Each epoch steps through every
    /// full batch, then records the loss over the whole training set and
    /// lets the schedule adjust the learning rate.
    pub(crate) fn train(&mut self) -> TrainResult<()> {
        for _ in 0..self.config.iterations {
            run_epoch(
                &self.features,
                &self.labels,
                &mut self.weights,
                &self.objective,
                self.learning_rate,
                self.config.batch_size,
            )?;

            let loss = self
                .objective
                .loss(&self.features, &self.labels, &self.weights)?;
            self.tracker.record(loss);
            self.learning_rate = self.tracker.adjusted_rate(self.learning_rate);
        }
        Ok(())
    }

    /// Standardize `observations` with the cached training moments and
    /// project them through the weights.
    pub(crate) fn project(&self, observations: &Matrix<T>) -> TrainResult<Matrix<T>> {
        let standardized = self.standardizer.transform(observations)?;
        Ok(standardized.matmul(&self.weights)?)
    }

    pub(crate) fn loss_history(&self) -> &[T] {
        self.tracker.history()
    }

    pub(crate) fn weights(&self) -> &Matrix<T> {
        &self.weights
    }
}
