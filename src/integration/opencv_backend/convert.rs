//! Conversions between crate types and OpenCV types.

use opencv::core::{self, Mat, Scalar};
use opencv::prelude::*;

use super::OpenCvError;
use crate::frame::{Bgr, Frame};
use crate::tracker::Rect;

/// Copy a frame into an owned `CV_8UC3` Mat.
pub fn frame_to_mat(frame: &Frame) -> Result<Mat, OpenCvError> {
    let flat = Mat::from_slice(frame.as_bytes())?;
    let shaped = flat.reshape(3, frame.height() as i32)?;
    Ok(shaped.try_clone()?)
}

/// Copy a `CV_8UC3` Mat into a frame.
pub fn mat_to_frame(mat: &Mat) -> Result<Frame, OpenCvError> {
    let typ = mat.typ();
    if typ != core::CV_8UC3 {
        return Err(OpenCvError::MatType(typ));
    }
    let width = mat.cols() as usize;
    let height = mat.rows() as usize;
    let bytes = if mat.is_continuous() {
        mat.data_bytes()?.to_vec()
    } else {
        mat.try_clone()?.data_bytes()?.to_vec()
    };
    Ok(Frame::from_bgr_bytes(width, height, bytes)?)
}

pub fn to_cv_rect(rect: &Rect) -> core::Rect {
    core::Rect::new(
        rect.x as i32,
        rect.y as i32,
        rect.width as i32,
        rect.height as i32,
    )
}

pub fn from_cv_rect(rect: core::Rect) -> Rect {
    Rect::new(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

pub(super) fn bgr_scalar(color: Bgr) -> Scalar {
    Scalar::new(
        f64::from(color[0]),
        f64::from(color[1]),
        f64::from(color[2]),
        0.0,
    )
}
