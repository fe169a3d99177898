//! Body activity labelling from pose keypoints.

mod classifier;
mod joint;
mod label;

pub use classifier::{LimbSpeeds, Thresholds, classify};
pub use joint::{Joint, JointSnapshot, PoseLandmarks};
pub use label::ActivityLabel;
