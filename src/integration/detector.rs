//! Traits for the face/emotion analyzer and the pose estimator.

use crate::activity::PoseLandmarks;
use crate::frame::Frame;
use crate::integration::face::FaceDetection;

/// Face detector + emotion classifier.
///
/// Implement this trait to connect any face analysis model to the pipeline.
///
/// # Example
///
/// ```ignore
/// use emoact_rs::{FaceDetection, FaceEmotionSource, Frame};
///
/// struct MyAnalyzer {
///     // Your model here
/// }
///
/// impl FaceEmotionSource for MyAnalyzer {
///     type Error = std::io::Error;
///
///     fn analyze(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Self::Error> {
///         // Run inference and return one entry per face
///         Ok(vec![])
///     }
/// }
/// ```
pub trait FaceEmotionSource {
    /// Error type for analysis failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find the faces in `frame` and their dominant emotions.
    ///
    /// A frame without faces is `Ok(vec![])`, not an error.
    fn analyze(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Self::Error>;
}

/// Single-person pose estimator.
pub trait PoseSource {
    /// Error type for estimation failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Estimate body landmarks in normalized coordinates.
    ///
    /// Returns `Ok(None)` when nobody is visible.
    fn process(&mut self, frame: &Frame) -> Result<Option<PoseLandmarks>, Self::Error>;
}

/// Pose source for runs without a pose model: never sees anybody.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPose;

impl PoseSource for NoPose {
    type Error = std::convert::Infallible;

    fn process(&mut self, _frame: &Frame) -> Result<Option<PoseLandmarks>, Self::Error> {
        Ok(None)
    }
}
