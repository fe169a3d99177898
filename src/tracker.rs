mod rect;
mod track_set;
mod tracked_face;
mod visual;

pub use rect::Rect;
pub use track_set::TrackSet;
pub use tracked_face::TrackedFace;
pub use visual::{TrackerFactory, VisualTracker};
