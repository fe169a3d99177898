//! Ephemeral set of face trackers living between two detection cycles.

use tracing::debug;

use crate::emotion::Emotion;
use crate::frame::Frame;
use crate::integration::FaceDetection;
use crate::tracker::rect::Rect;
use crate::tracker::tracked_face::TrackedFace;
use crate::tracker::visual::TrackerFactory;

/// Owns the active trackers of the current detection interval.
///
/// The whole set is thrown away and rebuilt at every detection cycle; no
/// identity is carried from one interval to the next.
pub struct TrackSet<F: TrackerFactory> {
    factory: F,
    tracks: Vec<TrackedFace<F::Tracker>>,
}

impl<F: TrackerFactory> TrackSet<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            tracks: Vec::new(),
        }
    }

    /// Discard every tracker.
    pub fn reset(&mut self) {
        self.tracks.clear();
    }

    /// Start one tracker per detection with a complete bounding box.
    ///
    /// Detections missing any of x/y/w/h are skipped, as are faces whose
    /// tracker cannot be created or initialized. Returns the number of tracks
    /// created.
    pub fn seed(&mut self, frame: &Frame, detections: &[FaceDetection]) -> usize {
        let before = self.tracks.len();
        for detection in detections {
            let Some(bbox) = detection.bbox() else {
                continue;
            };
            let tracker = match self.factory.create() {
                Ok(tracker) => tracker,
                Err(e) => {
                    debug!("Tracker construction failed, skipping face: {}", e);
                    continue;
                }
            };
            match TrackedFace::start(tracker, frame, bbox, detection.emotion()) {
                Ok(face) => self.tracks.push(face),
                Err(e) => debug!("Tracker init failed, skipping face: {}", e),
            }
        }
        self.tracks.len() - before
    }

    /// Step every tracker on `frame` and return the boxes still tracked.
    ///
    /// A tracker that loses its target or errors is dropped until the next
    /// detection cycle.
    pub fn advance(&mut self, frame: &Frame) -> Vec<(Rect, Emotion)> {
        self.tracks.retain_mut(|face| face.step(frame));
        self.tracks
            .iter()
            .map(|face| (face.bbox(), face.emotion()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::{FaceDetectionBuilder, FaceRegion};
    use crate::tracker::VisualTracker;
    use std::io;

    /// Drifts one pixel right per update and gives up after `lifetime` updates.
    struct DriftTracker {
        bbox: Rect,
        lifetime: u32,
        fail_init: bool,
    }

    impl VisualTracker for DriftTracker {
        type Error = io::Error;

        fn init(&mut self, _frame: &Frame, bbox: Rect) -> Result<(), Self::Error> {
            if self.fail_init {
                return Err(io::Error::other("init failed"));
            }
            self.bbox = bbox;
            Ok(())
        }

        fn update(&mut self, _frame: &Frame) -> Result<Option<Rect>, Self::Error> {
            if self.lifetime == 0 {
                return Ok(None);
            }
            self.lifetime -= 1;
            self.bbox.x += 1.0;
            Ok(Some(self.bbox))
        }
    }

    /// Hands out trackers with the scripted lifetimes, in order.
    struct ScriptedFactory {
        lifetimes: Vec<u32>,
        fail_init: bool,
        created: usize,
    }

    impl ScriptedFactory {
        fn new(lifetimes: Vec<u32>) -> Self {
            Self {
                lifetimes,
                fail_init: false,
                created: 0,
            }
        }
    }

    impl TrackerFactory for ScriptedFactory {
        type Tracker = DriftTracker;
        type Error = io::Error;

        fn create(&mut self) -> Result<Self::Tracker, Self::Error> {
            let lifetime = self.lifetimes.get(self.created).copied().unwrap_or(u32::MAX);
            self.created += 1;
            Ok(DriftTracker {
                bbox: Rect::default(),
                lifetime,
                fail_init: self.fail_init,
            })
        }
    }

    fn face(x: f32, emotion: &str) -> FaceDetection {
        FaceDetectionBuilder::new()
            .region(x, 10.0, 40.0, 40.0)
            .emotion(emotion)
            .build()
    }

    #[test]
    fn test_seed_skips_partial_detections() {
        let frame = Frame::new(100, 100);
        let mut tracks = TrackSet::new(ScriptedFactory::new(vec![]));

        let partial = FaceDetection {
            region: FaceRegion {
                x: Some(5.0),
                y: Some(5.0),
                w: Some(20.0),
                h: None,
            },
            dominant_emotion: Some(Emotion::Sad),
        };
        let seeded = tracks.seed(&frame, &[face(10.0, "happy"), partial]);

        assert_eq!(seeded, 1);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks.factory().created, 1);
    }

    #[test]
    fn test_advance_returns_boxes_with_seed_emotion() {
        let frame = Frame::new(100, 100);
        let mut tracks = TrackSet::new(ScriptedFactory::new(vec![]));
        tracks.seed(&frame, &[face(10.0, "happy"), face(50.0, "angry")]);

        let boxes = tracks.advance(&frame);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0], (Rect::new(11.0, 10.0, 40.0, 40.0), Emotion::Happy));
        assert_eq!(boxes[1], (Rect::new(51.0, 10.0, 40.0, 40.0), Emotion::Angry));
    }

    #[test]
    fn test_lost_track_is_dropped_for_the_interval() {
        let frame = Frame::new(100, 100);
        let mut tracks = TrackSet::new(ScriptedFactory::new(vec![1, 3]));
        tracks.seed(&frame, &[face(10.0, "happy"), face(50.0, "fear")]);

        assert_eq!(tracks.advance(&frame).len(), 2);
        let second = tracks.advance(&frame);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].1, Emotion::Fear);
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn test_init_failure_skips_face() {
        let frame = Frame::new(100, 100);
        let mut factory = ScriptedFactory::new(vec![]);
        factory.fail_init = true;
        let mut tracks = TrackSet::new(factory);

        assert_eq!(tracks.seed(&frame, &[face(10.0, "happy")]), 0);
        assert!(tracks.is_empty());
        assert!(tracks.advance(&frame).is_empty());
    }

    #[test]
    fn test_reset_discards_all_tracks() {
        let frame = Frame::new(100, 100);
        let mut tracks = TrackSet::new(ScriptedFactory::new(vec![]));
        tracks.seed(&frame, &[face(10.0, "happy"), face(50.0, "sad")]);
        assert_eq!(tracks.len(), 2);

        tracks.reset();
        assert!(tracks.is_empty());
        assert!(tracks.advance(&frame).is_empty());
    }
}
