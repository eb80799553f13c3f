use thiserror::Error;

/// Error type for all matrix operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("data length {got} does not fill a {rows}x{cols} matrix")]
    DataLength { rows: usize, cols: usize, got: usize },

    #[error("inner dimensions must match for multiply, got {left} and {right}")]
    InnerDimMismatch { left: usize, right: usize },

    #[error("row range {start}..{end} out of bounds for {rows} rows")]
    RowRange { start: usize, end: usize, rows: usize },

    #[error("ragged input: all rows must have the same number of columns")]
    RaggedRows,

    #[error("empty matrix")]
    EmptyMatrix,
}

pub type MatrixResult<T> = Result<T, MatrixError>;
