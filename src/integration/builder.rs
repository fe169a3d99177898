//! Builder for creating FaceDetection objects from detector outputs.

use crate::emotion::Emotion;
use crate::integration::face::{FaceDetection, FaceRegion};

/// Builder for creating `FaceDetection` objects from various box formats.
#[derive(Debug, Clone, Default)]
pub struct FaceDetectionBuilder {
    region: FaceRegion,
    emotion: Option<Emotion>,
}

impl FaceDetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region in TLWH format (left, top, width, height).
    pub fn region(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.region = FaceRegion {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
        };
        self
    }

    /// Set the region in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.region(x1, y1, x2 - x1, y2 - y1)
    }

    /// Set the dominant emotion.
    pub fn emotion(mut self, emotion: impl Into<Emotion>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    /// Build the final `FaceDetection`.
    pub fn build(self) -> FaceDetection {
        FaceDetection {
            region: self.region,
            dominant_emotion: self.emotion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Rect;

    #[test]
    fn test_face_detection_builder() {
        let det = FaceDetectionBuilder::new()
            .tlbr(10.0, 20.0, 50.0, 80.0)
            .emotion("surprise")
            .build();

        assert_eq!(det.bbox(), Some(Rect::new(10.0, 20.0, 40.0, 60.0)));
        assert_eq!(det.emotion(), Emotion::Surprise);
    }

    #[test]
    fn test_builder_without_region_is_incomplete() {
        let det = FaceDetectionBuilder::new().emotion(Emotion::Fear).build();
        assert!(det.bbox().is_none());
    }
}
