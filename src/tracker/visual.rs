//! Single-object visual tracker interface.

use crate::frame::Frame;
use crate::tracker::rect::Rect;

/// A single-object tracker, seeded with a box and then stepped frame by frame.
///
/// # Example
///
/// ```ignore
/// use emoact_rs::{Frame, Rect, VisualTracker};
///
/// struct Fixed(Rect);
///
/// impl VisualTracker for Fixed {
///     type Error = std::convert::Infallible;
///
///     fn init(&mut self, _frame: &Frame, bbox: Rect) -> Result<(), Self::Error> {
///         self.0 = bbox;
///         Ok(())
///     }
///
///     fn update(&mut self, _frame: &Frame) -> Result<Option<Rect>, Self::Error> {
///         Ok(Some(self.0))
///     }
/// }
/// ```
pub trait VisualTracker {
    /// Error type for tracker failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start tracking the object inside `bbox` on `frame`.
    fn init(&mut self, frame: &Frame, bbox: Rect) -> Result<(), Self::Error>;

    /// Locate the object on the next frame.
    ///
    /// `Ok(None)` means the tracker lost the object.
    fn update(&mut self, frame: &Frame) -> Result<Option<Rect>, Self::Error>;
}

/// Creates a fresh [`VisualTracker`] for every seeded face.
pub trait TrackerFactory {
    type Tracker: VisualTracker;

    /// Error type for tracker construction failures.
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(&mut self) -> Result<Self::Tracker, Self::Error>;
}
