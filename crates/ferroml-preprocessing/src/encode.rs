use ferroml_core::{Float, Matrix};

/// One-hot encode integer class ids into an `n x n_classes` matrix.
/// Ids outside `0..n_classes` leave their row all-zero.
pub fn one_hot<T: Float>(classes: &[usize], n_classes: usize) -> Matrix<T> {
    let n = classes.len();
    let mut data = vec![T::ZERO; n * n_classes];
    for (i, &cls) in classes.iter().enumerate() {
        if cls < n_classes {
            data[i * n_classes + cls] = T::ONE;
        }
    }
    Matrix::new(data, n, n_classes).expect("one_hot dimensions are consistent")
}

/// Bucket a continuous column into one-hot class rows by ascending
/// thresholds: values below `thresholds[0]` fall in class 0, values below
/// `thresholds[1]` in class 1, and so on, with everything else in the last
/// class. `k` thresholds produce `k + 1` classes.
pub fn one_hot_by_thresholds<T: Float>(values: &[T], thresholds: &[T]) -> Matrix<T> {
    let classes: Vec<usize> = values
        .iter()
        .map(|&v| {
            thresholds
                .iter()
                .position(|&t| v < t)
                .unwrap_or(thresholds.len())
        })
        .collect();
    one_hot(&classes, thresholds.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot() {
        let oh: Matrix<f64> = one_hot(&[0, 1, 2, 1], 3);
        assert_eq!(oh.shape(), (4, 3));
        assert_eq!(oh.get(0, 0), Some(1.0));
        assert_eq!(oh.get(1, 1), Some(1.0));
        assert_eq!(oh.get(2, 2), Some(1.0));
        assert_eq!(oh.get(3, 1), Some(1.0));
        for i in 0..4 {
            let ones: f64 = oh.row(i).iter().sum();
            assert_eq!(ones, 1.0);
        }
    }

    #[test]
    fn test_one_hot_by_thresholds() {
        // fuel economy buckets: low < 15, mid < 30, high otherwise
        let oh: Matrix<f64> = one_hot_by_thresholds(&[10.0, 22.0, 35.0, 14.9], &[15.0, 30.0]);
        assert_eq!(oh.shape(), (4, 3));
        assert_eq!(oh.row(0), &[1.0, 0.0, 0.0]);
        assert_eq!(oh.row(1), &[0.0, 1.0, 0.0]);
        assert_eq!(oh.row(2), &[0.0, 0.0, 1.0]);
        assert_eq!(oh.row(3), &[1.0, 0.0, 0.0]);
    }
}
