//! Decoded video frame.

use ndarray::{Array3, s};

use crate::error::FrameError;
use crate::tracker::Rect;

/// BGR color triple.
pub type Bgr = [u8; 3];

/// One decoded video frame: a `(height, width, 3)` BGR pixel array in
/// row-major layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Array3<u8>,
}

impl Frame {
    /// Create a black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array3::zeros((height, width, 3)),
        }
    }

    /// Build a frame from packed, row-major BGR bytes.
    pub fn from_bgr_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self, FrameError> {
        let expected = width * height * 3;
        if bytes.len() != expected {
            return Err(FrameError::BufferSize {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = Array3::from_shape_vec((height, width, 3), bytes)?;
        Ok(Self { pixels })
    }

    /// Wrap an existing `(height, width, 3)` array.
    pub fn from_array(pixels: Array3<u8>) -> Result<Self, FrameError> {
        let channels = pixels.dim().2;
        if channels != 3 {
            return Err(FrameError::Channels(channels));
        }
        let pixels = if pixels.is_standard_layout() {
            pixels
        } else {
            pixels.as_standard_layout().into_owned()
        };
        Ok(Self { pixels })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut Array3<u8> {
        &mut self.pixels
    }

    /// Packed row-major BGR bytes.
    pub fn as_bytes(&self) -> &[u8] {
        // Constructors only admit standard-layout arrays.
        self.pixels.as_slice().unwrap_or(&[])
    }

    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }

    /// BGR value at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Bgr> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
        ])
    }

    /// Draw a rectangle outline, clipped to the frame.
    ///
    /// The stroke grows inward from the box edge.
    pub fn draw_rect(&mut self, rect: &Rect, color: Bgr, thickness: usize) {
        let Some(clipped) = rect.truncated().clamp_to(self.width() as f32, self.height() as f32)
        else {
            return;
        };
        let [x1, y1, x2, y2] = clipped.to_tlbr().map(|v| v as usize);
        let t = thickness.max(1);

        let top = (y1, (y1 + t).min(y2));
        let bottom = (y2.saturating_sub(t).max(y1), y2);
        let left = (x1, (x1 + t).min(x2));
        let right = (x2.saturating_sub(t).max(x1), x2);

        self.fill(top.0..top.1, x1..x2, color);
        self.fill(bottom.0..bottom.1, x1..x2, color);
        self.fill(y1..y2, left.0..left.1, color);
        self.fill(y1..y2, right.0..right.1, color);
    }

    fn fill(&mut self, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>, color: Bgr) {
        if rows.is_empty() || cols.is_empty() {
            return;
        }
        let mut region = self.pixels.slice_mut(s![rows, cols, ..]);
        for mut px in region.lanes_mut(ndarray::Axis(2)) {
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
        }
    }
}
