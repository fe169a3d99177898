//! OpenCV backend: video I/O, visual trackers, face/emotion analysis and pose
//! estimation.
//!
//! # Example
//!
//! ```ignore
//! use emoact_rs::integration::opencv_backend::{
//!     DnnPoseEstimator, OpenCvAnnotator, OpenCvFaceAnalyzer, OpenCvTrackerFactory, OpenCvVideo,
//! };
//! use emoact_rs::{FaceBackend, Pipeline, PipelineConfig, TrackerKind};
//!
//! let faces = OpenCvFaceAnalyzer::new(FaceBackend::Yunet, "yunet.onnx".as_ref())?
//!     .with_emotion_model("emotion.onnx".as_ref())?;
//! let pose = DnnPoseEstimator::new("movenet.onnx".as_ref())?;
//! let trackers = OpenCvTrackerFactory::new(TrackerKind::Csrt);
//! let mut pipeline = Pipeline::new(faces, pose, trackers, PipelineConfig::default())?
//!     .with_annotator(OpenCvAnnotator);
//! pipeline.run(&OpenCvVideo, "input.mp4".as_ref(), "out/annotated.mp4".as_ref())?;
//! ```

mod annotate;
mod convert;
mod face;
mod pose;
mod tracker;
mod video;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::FrameError;

pub use annotate::OpenCvAnnotator;
pub use convert::{frame_to_mat, from_cv_rect, mat_to_frame, to_cv_rect};
pub use face::OpenCvFaceAnalyzer;
pub use pose::{DEFAULT_INPUT_SIDE, DEFAULT_MIN_SCORE, DnnPoseEstimator};
pub use tracker::{OpenCvTracker, OpenCvTrackerFactory};
pub use video::{CaptureSource, OpenCvVideo, WriterSink};

/// Error type for the OpenCV backend.
#[derive(Debug, Error)]
pub enum OpenCvError {
    #[error(transparent)]
    Cv(#[from] opencv::Error),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("cannot open video stream {}", .0.display())]
    Open(PathBuf),

    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("unsupported Mat type {0}, expected 8-bit 3-channel")]
    MatType(i32),

    #[error("model output holds {actual} values, expected at least {expected}")]
    ModelOutput { expected: usize, actual: usize },
}

/// OpenCV takes file names as `&str`.
fn path_str(path: &Path) -> Result<&str, OpenCvError> {
    path.to_str()
        .ok_or_else(|| OpenCvError::NonUtf8Path(path.to_path_buf()))
}
