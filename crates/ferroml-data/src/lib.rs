pub mod loader;

pub use loader::{load_csv, CsvDataset, CsvOptions, DataError};
