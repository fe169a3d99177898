use crate::emotion::Emotion;
use crate::frame::Frame;
use crate::tracker::rect::Rect;
use crate::tracker::visual::VisualTracker;

/// A live tracker plus the emotion its face was labelled with at seed time.
#[derive(Debug)]
pub struct TrackedFace<T> {
    tracker: T,
    emotion: Emotion,
    bbox: Rect,
}

impl<T: VisualTracker> TrackedFace<T> {
    /// Initialize `tracker` on `bbox`.
    pub fn start(
        mut tracker: T,
        frame: &Frame,
        bbox: Rect,
        emotion: Emotion,
    ) -> Result<Self, T::Error> {
        tracker.init(frame, bbox)?;
        Ok(Self {
            tracker,
            emotion,
            bbox,
        })
    }

    /// Step the tracker; `false` once the face is lost or the tracker failed.
    pub fn step(&mut self, frame: &Frame) -> bool {
        match self.tracker.update(frame) {
            Ok(Some(bbox)) => {
                self.bbox = bbox;
                true
            }
            Ok(None) | Err(_) => false,
        }
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    /// Last known box.
    pub fn bbox(&self) -> Rect {
        self.bbox
    }
}
