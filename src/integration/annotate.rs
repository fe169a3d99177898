//! Drawing tracked faces onto output frames.

use crate::emotion::Emotion;
use crate::frame::{Bgr, Frame};
use crate::tracker::Rect;

/// Box outline color.
pub const BOX_COLOR: Bgr = [0, 255, 0];
/// Label text color.
pub const LABEL_COLOR: Bgr = [36, 255, 12];
pub const BOX_THICKNESS: usize = 2;
/// Label baseline offset above the box.
pub const LABEL_OFFSET: f32 = 10.0;

/// Draws one tracked face.
pub trait Annotator {
    fn annotate(&mut self, frame: &mut Frame, bbox: &Rect, emotion: Emotion);
}

/// Draws the box outline only; the emotion label needs a font backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxAnnotator;

impl Annotator for BoxAnnotator {
    fn annotate(&mut self, frame: &mut Frame, bbox: &Rect, _emotion: Emotion) {
        frame.draw_rect(bbox, BOX_COLOR, BOX_THICKNESS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_annotator_draws_outline_without_label() {
        let mut frame = Frame::new(100, 100);
        BoxAnnotator.annotate(&mut frame, &Rect::new(20.0, 40.0, 40.0, 40.0), Emotion::Happy);

        assert_eq!(frame.pixel(20, 60), Some(BOX_COLOR));
        assert_eq!(frame.pixel(40, 41), Some(BOX_COLOR));
        assert_eq!(frame.pixel(40, 60), Some([0, 0, 0]));
        // Nothing above the box where a label would go.
        let label_area = (20..40).any(|y| (0..100).any(|x| frame.pixel(x, y) != Some([0, 0, 0])));
        assert!(!label_area);
    }
}
