use crate::error::{TrainError, TrainResult};
use ferroml_core::Float;

/// Hyperparameters for minibatch gradient descent.
///
/// `batch_size` has no sensible default (a wrong guess silently drops
/// training rows), so it is a required constructor argument. The remaining
/// fields default to `learning_rate = 0.1` and `iterations = 1000`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig<T: Float> {
    /// Initial step size. Adjusted every epoch by the loss schedule.
    pub learning_rate: T,
    /// Number of epochs. Zero is allowed and leaves the weights at their
    /// initialization.
    pub iterations: usize,
    /// Rows per gradient step. A trailing partial batch is dropped, so pick
    /// a size that divides the sample count unless the remainder is
    /// acceptable.
    pub batch_size: usize,
}

impl<T: Float> TrainConfig<T> {
    pub fn new(batch_size: usize) -> Self {
        TrainConfig {
            learning_rate: T::from_f64(0.1),
            iterations: 1000,
            batch_size,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: T) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Validate against the training-set size. Run once at estimator
    /// construction; a batch size of zero or larger than the sample count
    /// would otherwise train on no rows at all and return an untouched
    /// zero-weight model.
    pub fn validate(&self, n_samples: usize) -> TrainResult<()> {
        if !(self.learning_rate > T::ZERO) {
            return Err(TrainError::InvalidLearningRate(
                self.learning_rate.to_f64(),
            ));
        }
        if self.batch_size == 0 || self.batch_size > n_samples {
            return Err(TrainError::InvalidBatchSize {
                batch_size: self.batch_size,
                n_samples,
            });
        }
        Ok(())
    }
}
