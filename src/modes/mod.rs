pub mod rollout;
pub mod train;

pub use rollout::{RolloutConfig, RolloutMode};
pub use train::{TrainConfig, TrainMode};
