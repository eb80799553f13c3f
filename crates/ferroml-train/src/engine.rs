use crate::objective::Objective;
use ferroml_core::{Float, Matrix, MatrixResult};

/// One epoch of minibatch gradient descent.
///
/// Partitions `features`/`labels` into contiguous batches of exactly
/// `batch_size` rows, in original row order; a trailing partial batch is
/// dropped. Shuffling, when wanted, happens once at the data boundary
/// before training, never here. Updates are applied in place and
/// sequentially, so the weights seen by batch `j + 1` already include batch
/// `j`'s step.
pub fn run_epoch<T: Float, O: Objective<T>>(
    features: &Matrix<T>,
    labels: &Matrix<T>,
    weights: &mut Matrix<T>,
    objective: &O,
    learning_rate: T,
    batch_size: usize,
) -> MatrixResult<()> {
    let batch_count = features.rows() / batch_size;
    for j in 0..batch_count {
        let start = j * batch_size;
        let batch_features = features.slice_rows(start, start + batch_size)?;
        let batch_labels = labels.slice_rows(start, start + batch_size)?;

        let gradient = objective.gradient(&batch_features, &batch_labels, weights)?;
        *weights = weights.sub(&gradient.mul_scalar(learning_rate))?;
    }
    Ok(())
}
