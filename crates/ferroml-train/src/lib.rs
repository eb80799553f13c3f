pub mod config;
pub mod engine;
pub mod error;
pub mod objective;
pub mod schedule;

pub use config::TrainConfig;
pub use engine::run_epoch;
pub use error::{TrainError, TrainResult};
pub use objective::{Objective, ResidualObjective, SoftmaxObjective};
pub use schedule::LossTracker;
