/// Face box in pixel space: top-left corner plus size, the layout face
/// detectors report and visual trackers consume.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from corners `(x1, y1)` and `(x2, y2)`.
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Drop the fractional part of every field.
    ///
    /// Detector regions are consumed as whole pixels.
    #[inline]
    pub fn truncated(&self) -> Self {
        Self::new(
            self.x.trunc(),
            self.y.trunc(),
            self.width.trunc(),
            self.height.trunc(),
        )
    }

    /// Intersect with the `[0, width) x [0, height)` image area.
    ///
    /// Returns `None` when nothing of the box is left inside the image.
    pub fn clamp_to(&self, width: f32, height: f32) -> Option<Self> {
        let [x1, y1, x2, y2] = self.to_tlbr();
        let (x1, y1) = (x1.max(0.0), y1.max(0.0));
        let (x2, y2) = (x2.min(width), y2.min(height));
        (x2 > x1 && y2 > y1).then(|| Self::from_tlbr(x1, y1, x2, y2))
    }
}
