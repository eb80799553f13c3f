mod fit;
pub mod regression;
pub mod softmax;

pub use regression::LinearRegressor;
pub use softmax::SoftmaxClassifier;
