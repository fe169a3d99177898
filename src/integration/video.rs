//! Video decode/encode collaborators.

use std::path::Path;

use crate::config::FourCc;
use crate::frame::Frame;

/// Stream properties reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Frame count from the container, `None` when it does not say.
    pub frame_count: Option<u64>,
}

/// Decoded frame stream. Released when dropped.
pub trait VideoSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn info(&self) -> VideoInfo;

    /// Next frame, `Ok(None)` at end of input.
    fn read_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}

/// Encoded frame sink. Flushed and released when dropped.
pub trait VideoSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Opens sources and sinks on files.
pub trait VideoBackend {
    type Source: VideoSource;
    type Sink: VideoSink;
    type Error: std::error::Error + Send + Sync + 'static;

    fn open_input(&self, path: &Path) -> Result<Self::Source, Self::Error>;

    /// Open an encoder with the same geometry and frame rate as `info`.
    fn open_output(
        &self,
        path: &Path,
        info: &VideoInfo,
        codec: FourCc,
    ) -> Result<Self::Sink, Self::Error>;
}
