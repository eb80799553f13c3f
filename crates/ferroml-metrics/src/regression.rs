use ferroml_core::{Float, Matrix};

/// Mean squared error over all elements.
pub fn mse<T: Float>(y_true: &Matrix<T>, y_pred: &Matrix<T>) -> f64 {
    debug_assert_eq!(y_true.shape(), y_pred.shape());
    let n = y_true.data().len();
    let sum: f64 = y_true
        .data()
        .iter()
        .zip(y_pred.data().iter())
        .map(|(&t, &p)| {
            let d = (t - p).to_f64();
            d * d
        })
        .sum();
    sum / n as f64
}

/// R² (coefficient of determination): `1 - ss_res / ss_tot`.
///
/// When the true labels are constant, `ss_tot` is zero and the result is
/// NaN (or -infinity if the predictions miss). The degeneracy is
/// propagated, not masked; reject constant test labels upstream if that
/// matters.
pub fn r2_score<T: Float>(y_true: &Matrix<T>, y_pred: &Matrix<T>) -> f64 {
    debug_assert_eq!(y_true.shape(), y_pred.shape());
    let n = y_true.data().len() as f64;
    let mean_true: f64 = y_true.data().iter().map(|v| v.to_f64()).sum::<f64>() / n;

    let ss_res: f64 = y_true
        .data()
        .iter()
        .zip(y_pred.data().iter())
        .map(|(&t, &p)| {
            let d = t.to_f64() - p.to_f64();
            d * d
        })
        .sum();

    let ss_tot: f64 = y_true
        .data()
        .iter()
        .map(|&t| {
            let d = t.to_f64() - mean_true;
            d * d
        })
        .sum();

    1.0 - ss_res / ss_tot
}
