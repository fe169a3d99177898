//! Box and emotion label drawing with OpenCV text rendering.

use opencv::core::Point;
use opencv::imgproc;
use tracing::debug;

use super::OpenCvError;
use super::convert::{bgr_scalar, frame_to_mat, mat_to_frame, to_cv_rect};
use crate::emotion::Emotion;
use crate::frame::Frame;
use crate::integration::annotate::{Annotator, BOX_COLOR, BOX_THICKNESS, LABEL_COLOR, LABEL_OFFSET};
use crate::tracker::Rect;

const FONT_SCALE: f64 = 0.9;

/// Draws the face box and its emotion name just above it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCvAnnotator;

impl Annotator for OpenCvAnnotator {
    fn annotate(&mut self, frame: &mut Frame, bbox: &Rect, emotion: Emotion) {
        if let Err(e) = draw_labeled_box(frame, bbox, emotion) {
            debug!("Label drawing failed, drawing box only: {}", e);
            frame.draw_rect(bbox, BOX_COLOR, BOX_THICKNESS);
        }
    }
}

fn draw_labeled_box(frame: &mut Frame, bbox: &Rect, emotion: Emotion) -> Result<(), OpenCvError> {
    let mut mat = frame_to_mat(frame)?;
    let roi = to_cv_rect(bbox);
    imgproc::rectangle(
        &mut mat,
        roi,
        bgr_scalar(BOX_COLOR),
        BOX_THICKNESS as i32,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::put_text(
        &mut mat,
        emotion.as_str(),
        Point::new(roi.x, roi.y - LABEL_OFFSET as i32),
        imgproc::FONT_HERSHEY_SIMPLEX,
        FONT_SCALE,
        bgr_scalar(LABEL_COLOR),
        2,
        imgproc::LINE_8,
        false,
    )?;
    *frame = mat_to_frame(&mat)?;
    Ok(())
}
