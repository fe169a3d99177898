//! CSRT and KCF visual trackers.

use opencv::core::{self, Ptr};
use opencv::prelude::*;
use opencv::tracking::{TrackerCSRT, TrackerCSRT_Params, TrackerKCF, TrackerKCF_Params};

use super::OpenCvError;
use super::convert::{frame_to_mat, from_cv_rect, to_cv_rect};
use crate::config::TrackerKind;
use crate::frame::Frame;
use crate::tracker::{Rect, TrackerFactory, VisualTracker};

pub enum OpenCvTracker {
    Csrt(Ptr<TrackerCSRT>),
    Kcf(Ptr<TrackerKCF>),
}

impl OpenCvTracker {
    pub fn new(kind: TrackerKind) -> Result<Self, OpenCvError> {
        Ok(match kind {
            TrackerKind::Csrt => {
                let params = TrackerCSRT_Params::default()?;
                OpenCvTracker::Csrt(TrackerCSRT::create(&params)?)
            }
            TrackerKind::Kcf => {
                let params = TrackerKCF_Params::default()?;
                OpenCvTracker::Kcf(TrackerKCF::create(params)?)
            }
        })
    }
}

impl VisualTracker for OpenCvTracker {
    type Error = OpenCvError;

    fn init(&mut self, frame: &Frame, bbox: Rect) -> Result<(), Self::Error> {
        let mat = frame_to_mat(frame)?;
        let roi = to_cv_rect(&bbox);
        match self {
            OpenCvTracker::Csrt(tracker) => tracker.init(&mat, roi)?,
            OpenCvTracker::Kcf(tracker) => tracker.init(&mat, roi)?,
        }
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Result<Option<Rect>, Self::Error> {
        let mat = frame_to_mat(frame)?;
        let mut roi = core::Rect::default();
        let found = match self {
            OpenCvTracker::Csrt(tracker) => tracker.update(&mat, &mut roi)?,
            OpenCvTracker::Kcf(tracker) => tracker.update(&mat, &mut roi)?,
        };
        Ok(found.then(|| from_cv_rect(roi)))
    }
}

/// Creates trackers of one kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCvTrackerFactory {
    kind: TrackerKind,
}

impl OpenCvTrackerFactory {
    pub fn new(kind: TrackerKind) -> Self {
        Self { kind }
    }
}

impl TrackerFactory for OpenCvTrackerFactory {
    type Tracker = OpenCvTracker;
    type Error = OpenCvError;

    fn create(&mut self) -> Result<Self::Tracker, Self::Error> {
        OpenCvTracker::new(self.kind)
    }
}
