//! # ferroml
//!
//! Linear regression and multinomial (softmax) logistic regression trained
//! by minibatch gradient descent, with train/test-consistent feature
//! standardization and an adaptive learning-rate schedule.
//!
//! ## Modules
//!
//! - **core** — dense 2-D `Matrix` backend: elementwise ops, matmul,
//!   transpose, column reductions, row broadcasting, slicing, softmax
//! - **preprocessing** — `Standardizer` with fit-once cached moments and a
//!   bias column, one-hot label encoding
//! - **train** — `TrainConfig`, the minibatch epoch loop, gradient/loss
//!   `Objective` strategies, `LossTracker` with the adaptive schedule
//! - **linear** — `LinearRegressor` (R² evaluation) and `SoftmaxClassifier`
//!   (accuracy evaluation)
//! - **metrics** — `r2_score`, `accuracy`, `mse`
//! - **data** — CSV loading with column selection, seeded shuffling and
//!   train/test splitting
//!
//! ## Example
//!
//! ```
//! use ferroml::core::Matrix;
//! use ferroml::linear::LinearRegressor;
//! use ferroml::train::TrainConfig;
//!
//! let features = Matrix::from_rows(&[
//!     vec![1.0, 2.0],
//!     vec![2.0, 1.0],
//!     vec![3.0, 4.0],
//!     vec![4.0, 3.0],
//! ]).unwrap();
//! let labels = Matrix::column_vector(&[8.0, 7.0, 18.0, 17.0]); // 2a + 3b
//!
//! let config = TrainConfig::new(4).with_iterations(300);
//! let mut model = LinearRegressor::new(&features, labels, config).unwrap();
//! model.train().unwrap();
//!
//! let r2 = model.test(
//!     &Matrix::from_rows(&[vec![2.0, 3.0], vec![1.0, 1.0]]).unwrap(),
//!     &Matrix::column_vector(&[13.0, 5.0]),
//! ).unwrap();
//! assert!(r2 > 0.99);
//! ```

/// Dense 2-D matrix backend.
pub use ferroml_core as core;

/// Feature standardization and label encoding.
pub use ferroml_preprocessing as preprocessing;

/// Minibatch gradient-descent engine, objectives and schedule.
pub use ferroml_train as train;

/// Gradient-descent linear models.
pub use ferroml_linear as linear;

/// Evaluation metrics.
pub use ferroml_metrics as metrics;

/// CSV loading and splitting.
pub use ferroml_data as data;
