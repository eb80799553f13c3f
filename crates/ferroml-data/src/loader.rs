use ferroml_core::{Float, Matrix, MatrixError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("column {0:?} not found in header")]
    MissingColumn(String),

    #[error("row {row}, column {column:?}: cannot parse {value:?} as a number")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("test_rows ({test_rows}) must be smaller than the row count ({rows})")]
    TestSplitTooLarge { test_rows: usize, rows: usize },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// What to read out of a CSV file and how to partition it.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Header names of the feature columns, in output order.
    pub feature_columns: Vec<String>,
    /// Header names of the label columns, in output order.
    pub label_columns: Vec<String>,
    /// Shuffle rows once, before the split. The training loop itself never
    /// reorders rows, so this is the only place randomness enters.
    pub shuffle: bool,
    /// Seed for reproducible shuffling; `None` draws from entropy.
    pub shuffle_seed: Option<u64>,
    /// Number of rows (taken from the front, after any shuffle) held out as
    /// the test partition. Zero keeps everything in the training set.
    pub test_rows: usize,
}

impl CsvOptions {
    pub fn new(
        feature_columns: impl IntoIterator<Item = impl Into<String>>,
        label_columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        CsvOptions {
            feature_columns: feature_columns.into_iter().map(Into::into).collect(),
            label_columns: label_columns.into_iter().map(Into::into).collect(),
            shuffle: false,
            shuffle_seed: None,
            test_rows: 0,
        }
    }

    pub fn shuffled(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.shuffle_seed = seed;
        self
    }

    pub fn with_test_rows(mut self, test_rows: usize) -> Self {
        self.test_rows = test_rows;
        self
    }
}

/// Pre-split numeric matrices ready for an estimator. The test partition is
/// empty (zero rows) when `test_rows` was zero.
#[derive(Debug, Clone)]
pub struct CsvDataset<T: Float> {
    pub features: Matrix<T>,
    pub labels: Matrix<T>,
    pub test_features: Matrix<T>,
    pub test_labels: Matrix<T>,
}

/// Load selected columns of a headered CSV file into feature/label matrices.
pub fn load_csv<T: Float>(path: impl AsRef<Path>, options: &CsvOptions) -> Result<CsvDataset<T>, DataError> {
    let reader = csv::Reader::from_path(path)?;
    read_from(reader, options)
}

fn read_from<T: Float, R: Read>(
    mut reader: csv::Reader<R>,
    options: &CsvOptions,
) -> Result<CsvDataset<T>, DataError> {
    let headers = reader.headers()?.clone();
    let column_index = |name: &String| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h == name.as_str())
            .ok_or_else(|| DataError::MissingColumn(name.clone()))
    };

    let feature_idx: Vec<usize> = options
        .feature_columns
        .iter()
        .map(column_index)
        .collect::<Result<_, _>>()?;
    let label_idx: Vec<usize> = options
        .label_columns
        .iter()
        .map(column_index)
        .collect::<Result<_, _>>()?;

    let mut feature_rows: Vec<Vec<T>> = Vec::new();
    let mut label_rows: Vec<Vec<T>> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let parse = |idx: &usize, name: &String| -> Result<T, DataError> {
            let raw = record.get(*idx).unwrap_or("");
            raw.trim()
                .parse::<f64>()
                .map(T::from_f64)
                .map_err(|_| DataError::NonNumeric {
                    row,
                    column: name.clone(),
                    value: raw.to_string(),
                })
        };

        feature_rows.push(
            feature_idx
                .iter()
                .zip(&options.feature_columns)
                .map(|(i, n)| parse(i, n))
                .collect::<Result<_, _>>()?,
        );
        label_rows.push(
            label_idx
                .iter()
                .zip(&options.label_columns)
                .map(|(i, n)| parse(i, n))
                .collect::<Result<_, _>>()?,
        );
    }

    let n_rows = feature_rows.len();
    if options.test_rows > 0 && options.test_rows >= n_rows {
        return Err(DataError::TestSplitTooLarge {
            test_rows: options.test_rows,
            rows: n_rows,
        });
    }

    let mut order: Vec<usize> = (0..n_rows).collect();
    if options.shuffle {
        let mut rng = match options.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        order.shuffle(&mut rng);
    }

    let pick = |rows: &[Vec<T>], indices: &[usize]| -> Result<Matrix<T>, DataError> {
        let selected: Vec<Vec<T>> = indices.iter().map(|&i| rows[i].clone()).collect();
        if selected.is_empty() {
            let cols = rows.first().map_or(0, Vec::len);
            return Ok(Matrix::zeros(0, cols));
        }
        Ok(Matrix::from_rows(&selected)?)
    };

    let (test_order, train_order) = order.split_at(options.test_rows);

    Ok(CsvDataset {
        features: pick(&feature_rows, train_order)?,
        labels: pick(&label_rows, train_order)?,
        test_features: pick(&feature_rows, test_order)?,
        test_labels: pick(&label_rows, test_order)?,
    })
}
