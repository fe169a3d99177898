//! Face analyzer output.

use serde::Deserialize;

use crate::emotion::Emotion;
use crate::tracker::Rect;

/// Face region as reported by the analyzer, in pixels.
///
/// Any field may be absent; such a region cannot seed a tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct FaceRegion {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
}

/// One analyzed face: where it is and which emotion dominates it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaceDetection {
    #[serde(default)]
    pub region: FaceRegion,
    #[serde(default)]
    pub dominant_emotion: Option<Emotion>,
}

impl FaceDetection {
    /// Whole-pixel bounding box, or `None` when the region is incomplete.
    pub fn bbox(&self) -> Option<Rect> {
        let FaceRegion { x, y, w, h } = self.region;
        Some(Rect::new(x?, y?, w?, h?).truncated())
    }

    /// Emotion label, `unknown` when the analyzer gave none.
    pub fn emotion(&self) -> Emotion {
        self.dominant_emotion.unwrap_or_default()
    }

    /// Emotion counted for a detection cycle.
    ///
    /// Taken from the first detection that has both a complete box and a
    /// label, `unknown` if there is none.
    pub fn representative(detections: &[FaceDetection]) -> Emotion {
        detections
            .iter()
            .filter(|d| d.bbox().is_some())
            .find_map(|d| d.dominant_emotion)
            .unwrap_or_default()
    }
}
