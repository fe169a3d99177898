//! Face localisation (YuNet or Haar cascade) plus an optional ONNX emotion
//! classifier.

use std::path::Path;

use opencv::core::{self, Mat, Ptr, Scalar, Size, Vector};
use opencv::dnn::{self, Net};
use opencv::imgproc;
use opencv::objdetect::{CascadeClassifier, FaceDetectorYN};
use opencv::prelude::*;
use tracing::debug;

use super::convert::{frame_to_mat, from_cv_rect, to_cv_rect};
use super::{OpenCvError, path_str};
use crate::config::FaceBackend;
use crate::emotion::Emotion;
use crate::frame::Frame;
use crate::integration::builder::FaceDetectionBuilder;
use crate::integration::detector::FaceEmotionSource;
use crate::integration::face::FaceDetection;
use crate::tracker::Rect;

const YUNET_SCORE_THRESHOLD: f32 = 0.6;
const YUNET_NMS_THRESHOLD: f32 = 0.3;
const YUNET_TOP_K: i32 = 50;
/// Column of the confidence score in a YuNet result row.
const YUNET_SCORE_COL: i32 = 14;

const HAAR_SCALE_FACTOR: f64 = 1.1;
const HAAR_MIN_NEIGHBORS: i32 = 5;
const HAAR_MIN_FACE: i32 = 30;

/// Side of the square grayscale crop the emotion model takes.
const EMOTION_INPUT_SIDE: i32 = 48;

enum FaceLocator {
    Yunet(Ptr<FaceDetectorYN>),
    Haar(CascadeClassifier),
}

impl FaceLocator {
    fn load(backend: FaceBackend, model: &Path) -> Result<Self, OpenCvError> {
        let model = path_str(model)?;
        Ok(match backend {
            FaceBackend::Yunet => FaceLocator::Yunet(FaceDetectorYN::create(
                model,
                "",
                Size::new(320, 320),
                YUNET_SCORE_THRESHOLD,
                YUNET_NMS_THRESHOLD,
                YUNET_TOP_K,
                dnn::DNN_BACKEND_DEFAULT,
                dnn::DNN_TARGET_CPU,
            )?),
            FaceBackend::Haar => FaceLocator::Haar(CascadeClassifier::new(model)?),
        })
    }

    /// Face boxes clipped to the frame.
    fn locate(&mut self, bgr: &Mat, gray: &Mat) -> Result<Vec<Rect>, OpenCvError> {
        let (width, height) = (bgr.cols() as f32, bgr.rows() as f32);
        let mut boxes = Vec::new();
        match self {
            FaceLocator::Yunet(detector) => {
                detector.set_input_size(Size::new(bgr.cols(), bgr.rows()))?;
                let mut faces = Mat::default();
                detector.detect(bgr, &mut faces)?;
                for i in 0..faces.rows() {
                    let score = *faces.at_2d::<f32>(i, YUNET_SCORE_COL)?;
                    let rect = Rect::new(
                        *faces.at_2d::<f32>(i, 0)?,
                        *faces.at_2d::<f32>(i, 1)?,
                        *faces.at_2d::<f32>(i, 2)?,
                        *faces.at_2d::<f32>(i, 3)?,
                    );
                    debug!("YuNet face {:?} score {:.2}", rect, score);
                    boxes.extend(rect.truncated().clamp_to(width, height));
                }
            }
            FaceLocator::Haar(cascade) => {
                let mut equalized = Mat::default();
                imgproc::equalize_hist(gray, &mut equalized)?;
                let mut found = Vector::<core::Rect>::new();
                cascade.detect_multi_scale(
                    &equalized,
                    &mut found,
                    HAAR_SCALE_FACTOR,
                    HAAR_MIN_NEIGHBORS,
                    0,
                    Size::new(HAAR_MIN_FACE, HAAR_MIN_FACE),
                    Size::default(),
                )?;
                boxes.extend(
                    found
                        .iter()
                        .filter_map(|r| from_cv_rect(r).clamp_to(width, height)),
                );
            }
        }
        Ok(boxes)
    }
}

/// Seven-way facial expression classifier over 48x48 grayscale crops.
///
/// Output scores follow [`Emotion::CLASSES`] order.
struct EmotionNet {
    net: Net,
}

impl EmotionNet {
    fn load(model: &Path) -> Result<Self, OpenCvError> {
        Ok(Self {
            net: dnn::read_net_from_onnx(path_str(model)?)?,
        })
    }

    fn classify(&mut self, gray: &Mat, face: &Rect) -> Result<Emotion, OpenCvError> {
        let crop = Mat::roi(gray, to_cv_rect(face))?;
        let blob = dnn::blob_from_image(
            &*crop,
            1.0 / 255.0,
            Size::new(EMOTION_INPUT_SIDE, EMOTION_INPUT_SIDE),
            Scalar::default(),
            false,
            false,
            core::CV_32F,
        )?;
        self.net.set_input(&blob, "", 1.0, Scalar::default())?;
        let output = self.net.forward_single("")?;
        let scores = output.data_typed::<f32>()?;

        let expected = Emotion::CLASSES.len();
        if scores.len() < expected {
            return Err(OpenCvError::ModelOutput {
                expected,
                actual: scores.len(),
            });
        }
        let best = scores[..expected]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or(usize::MAX, |(i, _)| i);
        Ok(Emotion::from_class_index(best))
    }
}

/// Face analyzer built on OpenCV models.
///
/// Without an emotion model every face is reported with no dominant emotion,
/// which the pipeline counts as `unknown`.
pub struct OpenCvFaceAnalyzer {
    locator: FaceLocator,
    emotion: Option<EmotionNet>,
}

impl OpenCvFaceAnalyzer {
    /// Load the face localisation model (YuNet ONNX or Haar cascade XML).
    pub fn new(backend: FaceBackend, face_model: &Path) -> Result<Self, OpenCvError> {
        Ok(Self {
            locator: FaceLocator::load(backend, face_model)?,
            emotion: None,
        })
    }

    /// Attach an ONNX expression classifier.
    pub fn with_emotion_model(mut self, model: &Path) -> Result<Self, OpenCvError> {
        self.emotion = Some(EmotionNet::load(model)?);
        Ok(self)
    }
}

impl FaceEmotionSource for OpenCvFaceAnalyzer {
    type Error = OpenCvError;

    fn analyze(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Self::Error> {
        let bgr = frame_to_mat(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color(&bgr, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

        let boxes = self.locator.locate(&bgr, &gray)?;
        let mut faces = Vec::with_capacity(boxes.len());
        for bbox in boxes {
            let mut builder =
                FaceDetectionBuilder::new().region(bbox.x, bbox.y, bbox.width, bbox.height);
            if let Some(net) = self.emotion.as_mut() {
                builder = builder.emotion(net.classify(&gray, &bbox)?);
            }
            faces.push(builder.build());
        }
        Ok(faces)
    }
}
