//! Integration module for connecting detectors, pose estimators, trackers and
//! video streams into the annotation pipeline.
//!
//! The external models are consumed through small traits so any inference
//! backend can be plugged in; an OpenCV implementation of all of them is
//! available behind the `opencv-backend` feature.

mod annotate;
mod builder;
mod detector;
mod face;
mod pipeline;
mod video;

pub use annotate::{Annotator, BOX_COLOR, BOX_THICKNESS, BoxAnnotator, LABEL_COLOR, LABEL_OFFSET};
pub use builder::FaceDetectionBuilder;
pub use detector::{FaceEmotionSource, NoPose, PoseSource};
pub use face::{FaceDetection, FaceRegion};
pub use pipeline::{FrameOutcome, FramePhase, Pipeline};
pub use video::{VideoBackend, VideoInfo, VideoSink, VideoSource};

#[cfg(feature = "opencv-backend")]
pub mod opencv_backend;
