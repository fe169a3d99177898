//! Single-person pose estimation with an ONNX keypoint model.

use std::path::Path;

use opencv::core::{self, Scalar, Size};
use opencv::dnn::{self, Net};
use opencv::prelude::*;

use super::convert::frame_to_mat;
use super::{OpenCvError, path_str};
use crate::activity::{Joint, PoseLandmarks};
use crate::frame::Frame;
use crate::integration::detector::PoseSource;

/// Input side of the default (MoveNet Lightning) model.
pub const DEFAULT_INPUT_SIDE: i32 = 192;
/// Keypoints scoring below this are treated as not visible.
pub const DEFAULT_MIN_SCORE: f32 = 0.5;

const KEYPOINT_COUNT: usize = Joint::ALL.len();

/// Pose estimator for MoveNet-style models.
///
/// The model takes a square NCHW float RGB image and returns 17 COCO
/// keypoints as `(y, x, score)` triples normalized to `[0, 1]`.
pub struct DnnPoseEstimator {
    net: Net,
    input_side: i32,
    min_score: f32,
}

impl DnnPoseEstimator {
    pub fn new(model: &Path) -> Result<Self, OpenCvError> {
        Ok(Self {
            net: dnn::read_net_from_onnx(path_str(model)?)?,
            input_side: DEFAULT_INPUT_SIDE,
            min_score: DEFAULT_MIN_SCORE,
        })
    }

    pub fn with_input_side(mut self, side: i32) -> Self {
        self.input_side = side;
        self
    }

    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }
}

impl PoseSource for DnnPoseEstimator {
    type Error = OpenCvError;

    fn process(&mut self, frame: &Frame) -> Result<Option<PoseLandmarks>, Self::Error> {
        let bgr = frame_to_mat(frame)?;
        let blob = dnn::blob_from_image(
            &bgr,
            1.0 / 255.0,
            Size::new(self.input_side, self.input_side),
            Scalar::default(),
            true,
            false,
            core::CV_32F,
        )?;
        self.net.set_input(&blob, "", 1.0, Scalar::default())?;
        let output = self.net.forward_single("")?;
        parse_keypoints(output.data_typed::<f32>()?, self.min_score)
    }
}

/// Turn `(y, x, score)` triples into landmarks, `None` when nothing is visible.
fn parse_keypoints(values: &[f32], min_score: f32) -> Result<Option<PoseLandmarks>, OpenCvError> {
    let expected = KEYPOINT_COUNT * 3;
    if values.len() < expected {
        return Err(OpenCvError::ModelOutput {
            expected,
            actual: values.len(),
        });
    }

    let mut landmarks = PoseLandmarks::new();
    for (index, keypoint) in values[..expected].chunks_exact(3).enumerate() {
        let (y, x, score) = (keypoint[0], keypoint[1], keypoint[2]);
        if score < min_score {
            continue;
        }
        if let Some(joint) = Joint::from_coco_index(index) {
            landmarks.insert(joint, x, y, 0.0);
        }
    }
    Ok((!landmarks.is_empty()).then_some(landmarks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keypoints_swaps_axes_and_drops_low_scores() {
        let mut values = vec![0.0; KEYPOINT_COUNT * 3];
        // nose at y=0.2, x=0.5
        values[0..3].copy_from_slice(&[0.2, 0.5, 0.9]);
        // left wrist below threshold
        values[9 * 3..9 * 3 + 3].copy_from_slice(&[0.8, 0.3, 0.1]);

        let landmarks = parse_keypoints(&values, 0.5).unwrap().unwrap();
        assert_eq!(landmarks.len(), 1);
        let nose = landmarks.get(Joint::Nose).unwrap();
        assert_eq!((nose.x, nose.y), (0.5, 0.2));
        assert!(landmarks.get(Joint::LeftWrist).is_none());
    }

    #[test]
    fn test_nobody_visible_is_none() {
        let values = vec![0.0; KEYPOINT_COUNT * 3];
        assert!(parse_keypoints(&values, 0.5).unwrap().is_none());
    }

    #[test]
    fn test_short_output_is_error() {
        assert!(matches!(
            parse_keypoints(&[0.0; 6], 0.5),
            Err(OpenCvError::ModelOutput { expected: 51, actual: 6 })
        ));
    }
}
