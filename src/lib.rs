//! Video annotation with per-frame facial emotion and body activity labels.
//!
//! Face analysis and pose estimation run every N-th frame; in between, the
//! detected faces are followed by visual trackers. Joint motion between two
//! detection cycles is turned into a coarse activity label, and label counts
//! are reported in a [`Summary`].

pub mod activity;
pub mod config;
pub mod emotion;
pub mod error;
pub mod frame;
pub mod integration;
pub mod summary;
pub mod tracker;

pub use activity::{ActivityLabel, Joint, JointSnapshot, PoseLandmarks, classify};
pub use config::{FaceBackend, FourCc, PipelineConfig, TrackerKind};
pub use emotion::Emotion;
pub use error::{BoxError, FrameError, PipelineError, Result};
pub use frame::Frame;
pub use integration::{
    Annotator, BoxAnnotator, FaceDetection, FaceDetectionBuilder, FaceEmotionSource, FaceRegion,
    FrameOutcome, FramePhase, NoPose, Pipeline, PoseSource, VideoBackend, VideoInfo, VideoSink,
    VideoSource,
};
pub use summary::Summary;
pub use tracker::{Rect, TrackSet, TrackedFace, TrackerFactory, VisualTracker};
