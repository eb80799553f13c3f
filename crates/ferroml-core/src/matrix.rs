use crate::dtype::Float;
use crate::error::{MatrixError, MatrixResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense 2-D matrix — the fundamental data structure of ferroml.
///
/// Stores elements in a flat contiguous `Vec<T>` with row-major layout.
/// Strictly two-dimensional; a column vector is an `n x 1` matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Matrix<T: Float> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: Float> Matrix<T> {
    /// Create a matrix from raw row-major data.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> MatrixResult<Self> {
        if data.len() != rows * cols {
            return Err(MatrixError::DataLength {
                rows,
                cols,
                got: data.len(),
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::ZERO; rows * cols],
            rows,
            cols,
        }
    }

    /// Matrix filled with ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::ONE; rows * cols],
            rows,
            cols,
        }
    }

    /// Build from nested rows. All rows must have equal length.
    pub fn from_rows(rows: &[Vec<T>]) -> MatrixResult<Self> {
        if rows.is_empty() {
            return Ok(Matrix::zeros(0, 0));
        }
        let cols = rows[0].len();
        for row in rows {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows);
            }
        }
        let data: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::new(data, rows.len(), cols)
    }

    /// An `n x 1` column vector from a slice.
    pub fn column_vector(values: &[T]) -> Self {
        Matrix {
            data: values.to_vec(),
            rows: values.len(),
            cols: 1,
        }
    }

    /// A `1 x n` row vector from a slice.
    pub fn row_vector(values: &[T]) -> Self {
        Matrix {
            data: values.to_vec(),
            rows: 1,
            cols: values.len(),
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(i, j)`, or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// One row as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    // ─── Element-wise ───────────────────────────────────────────────────────

    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Matrix<T> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn zip_with<F: Fn(T, T) -> T>(&self, other: &Matrix<T>, op: F) -> MatrixResult<Matrix<T>> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }
        let data: Vec<T> = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn add(&self, other: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn mul_elem(&self, other: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        self.zip_with(other, |a, b| a * b)
    }

    pub fn mul_scalar(&self, s: T) -> Matrix<T> {
        self.map(|x| x * s)
    }

    pub fn div_scalar(&self, s: T) -> Matrix<T> {
        self.map(|x| x / s)
    }

    // ─── Row-vector broadcasting ────────────────────────────────────────────

    fn broadcast_row<F: Fn(T, T) -> T>(&self, row: &Matrix<T>, op: F) -> MatrixResult<Matrix<T>> {
        if row.rows != 1 || row.cols != self.cols {
            return Err(MatrixError::ShapeMismatch {
                expected: (1, self.cols),
                got: row.shape(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len());
        for i in 0..self.rows {
            for j in 0..self.cols {
                data.push(op(self.data[i * self.cols + j], row.data[j]));
            }
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Subtract a `1 x cols` row vector from every row.
    pub fn sub_row(&self, row: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        self.broadcast_row(row, |a, b| a - b)
    }

    /// Divide every row by a `1 x cols` row vector.
    pub fn div_row(&self, row: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        self.broadcast_row(row, |a, b| a / b)
    }

    // ─── Linear algebra ─────────────────────────────────────────────────────

    /// Matrix multiply.
    pub fn matmul(&self, other: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        if self.cols != other.rows {
            return Err(MatrixError::InnerDimMismatch {
                left: self.cols,
                right: other.rows,
            });
        }
        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut data = vec![T::ZERO; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::ZERO;
                for p in 0..k {
                    sum += self.data[i * k + p] * other.data[p * n + j];
                }
                data[i * n + j] = sum;
            }
        }
        Ok(Matrix {
            data,
            rows: m,
            cols: n,
        })
    }

    pub fn transpose(&self) -> Matrix<T> {
        let mut data = vec![T::ZERO; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    // ─── Reductions ─────────────────────────────────────────────────────────

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::ZERO, |acc, &x| acc + x)
    }

    /// Column-wise mean as a `1 x cols` row vector.
    pub fn column_mean(&self) -> MatrixResult<Matrix<T>> {
        if self.rows == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        let n = T::from_usize(self.rows);
        let mut sums = vec![T::ZERO; self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                sums[j] += self.data[i * self.cols + j];
            }
        }
        for s in sums.iter_mut() {
            *s = *s / n;
        }
        Ok(Matrix::row_vector(&sums))
    }

    /// Column-wise population variance (ddof = 0) as a `1 x cols` row vector.
    pub fn column_variance(&self) -> MatrixResult<Matrix<T>> {
        let mean = self.column_mean()?;
        let n = T::from_usize(self.rows);
        let mut acc = vec![T::ZERO; self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                let d = self.data[i * self.cols + j] - mean.data[j];
                acc[j] += d * d;
            }
        }
        for v in acc.iter_mut() {
            *v = *v / n;
        }
        Ok(Matrix::row_vector(&acc))
    }

    // ─── Slicing / concatenation ────────────────────────────────────────────

    /// Contiguous row slice `start..end` as a new matrix.
    pub fn slice_rows(&self, start: usize, end: usize) -> MatrixResult<Matrix<T>> {
        if start > end || end > self.rows {
            return Err(MatrixError::RowRange {
                start,
                end,
                rows: self.rows,
            });
        }
        Ok(Matrix {
            data: self.data[start * self.cols..end * self.cols].to_vec(),
            rows: end - start,
            cols: self.cols,
        })
    }

    /// Concatenate horizontally: `[self | other]`. Row counts must match.
    pub fn hconcat(&self, other: &Matrix<T>) -> MatrixResult<Matrix<T>> {
        if self.rows != other.rows {
            return Err(MatrixError::ShapeMismatch {
                expected: (self.rows, other.cols),
                got: other.shape(),
            });
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.extend_from_slice(other.row(i));
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols,
        })
    }

    // ─── Activations ────────────────────────────────────────────────────────

    /// Sigmoid applied element-wise: `1 / (1 + exp(-x))`.
    pub fn sigmoid(&self) -> Matrix<T> {
        self.map(|x| T::ONE / (T::ONE + (-x).exp()))
    }

    /// Softmax over each row, with the usual max-subtraction for stability.
    pub fn softmax_rows(&self) -> Matrix<T> {
        let mut data = self.data.clone();
        for i in 0..self.rows {
            let start = i * self.cols;
            let end = start + self.cols;
            let row_max = data[start..end]
                .iter()
                .copied()
                .fold(T::NEG_INFINITY, T::max);
            let mut sum = T::ZERO;
            for v in data[start..end].iter_mut() {
                *v = (*v - row_max).exp();
                sum += *v;
            }
            for v in data[start..end].iter_mut() {
                *v = *v / sum;
            }
        }
        Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Index of the largest element in each row. Ties go to the first.
    pub fn argmax_rows(&self) -> Vec<usize> {
        (0..self.rows)
            .map(|i| {
                let row = self.row(i);
                let mut best = 0;
                for (j, &v) in row.iter().enumerate() {
                    if v > row[best] {
                        best = j;
                    }
                }
                best
            })
            .collect()
    }
}

impl<T: Float> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix([")?;
        for i in 0..self.rows.min(8) {
            write!(f, "  [")?;
            for (j, v) in self.row(i).iter().take(8).enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", v)?;
            }
            if self.cols > 8 {
                write!(f, ", ...")?;
            }
            writeln!(f, "],")?;
        }
        if self.rows > 8 {
            writeln!(f, "  ...")?;
        }
        write!(f, "], shape=({}, {}))", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction() {
        let m: Matrix<f64> = Matrix::zeros(3, 4);
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.data()[0], 0.0);

        let m: Matrix<f64> = Matrix::ones(2, 3);
        assert_eq!(m.sum(), 6.0);

        assert!(Matrix::new(vec![1.0, 2.0, 3.0], 2, 2).is_err());
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(2, 0), None);

        assert_eq!(
            Matrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]),
            Err(MatrixError::RaggedRows)
        );
    }

    #[test]
    fn test_elementwise() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        assert_eq!(a.add(&b).unwrap().data(), &[6.0, 8.0, 10.0, 12.0]);
        assert_eq!(b.sub(&a).unwrap().data(), &[4.0, 4.0, 4.0, 4.0]);
        assert_eq!(a.mul_scalar(2.0).data(), &[2.0, 4.0, 6.0, 8.0]);

        let c: Matrix<f64> = Matrix::zeros(3, 2);
        assert!(a.add(&c).is_err());
    }

    #[test]
    fn test_matmul() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);

        assert!(b.matmul(&b).is_err());
    }

    #[test]
    fn test_transpose() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_column_stats() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let mean = m.column_mean().unwrap();
        assert_eq!(mean.data(), &[3.0, 4.0]);

        // population variance of [1, 3, 5] is 8/3
        let var = m.column_variance().unwrap();
        assert_relative_eq!(var.data()[0], 8.0 / 3.0);
        assert_relative_eq!(var.data()[1], 8.0 / 3.0);

        let empty: Matrix<f64> = Matrix::zeros(0, 2);
        assert_eq!(empty.column_mean(), Err(MatrixError::EmptyMatrix));
    }

    #[test]
    fn test_row_broadcasting() {
        let m = Matrix::from_rows(&[vec![10.0, 20.0], vec![30.0, 40.0]]).unwrap();
        let row = Matrix::row_vector(&[10.0, 20.0]);
        assert_eq!(m.sub_row(&row).unwrap().data(), &[0.0, 0.0, 20.0, 20.0]);
        assert_eq!(m.div_row(&row).unwrap().data(), &[1.0, 1.0, 3.0, 2.0]);

        let bad = Matrix::row_vector(&[1.0, 2.0, 3.0]);
        assert!(m.sub_row(&bad).is_err());
    }

    #[test]
    fn test_slice_rows() {
        let m = Matrix::from_rows(&[vec![1.0], vec![2.0], vec![3.0], vec![4.0]]).unwrap();
        let s = m.slice_rows(1, 3).unwrap();
        assert_eq!(s.data(), &[2.0, 3.0]);
        assert!(m.slice_rows(2, 5).is_err());
    }

    #[test]
    fn test_hconcat() {
        let ones: Matrix<f64> = Matrix::ones(2, 1);
        let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
        let joined = ones.hconcat(&m).unwrap();
        assert_eq!(joined.shape(), (2, 3));
        assert_eq!(joined.data(), &[1.0, 2.0, 3.0, 1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_sigmoid() {
        let m = Matrix::row_vector(&[0.0_f64]);
        assert_relative_eq!(m.sigmoid().data()[0], 0.5);
    }

    #[test]
    fn test_softmax_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![1000.0, 1000.0, 1000.0]]).unwrap();
        let sm = m.softmax_rows();
        let row0: f64 = sm.row(0).iter().sum();
        assert_relative_eq!(row0, 1.0, epsilon = 1e-12);
        // large but equal logits must not overflow
        assert_relative_eq!(sm.get(1, 0).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
        assert!(sm.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_argmax_rows() {
        let m = Matrix::from_rows(&[vec![0.1, 0.7, 0.2], vec![0.9, 0.05, 0.05]]).unwrap();
        assert_eq!(m.argmax_rows(), vec![1, 0]);
    }
}
