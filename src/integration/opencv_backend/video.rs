//! File-backed video streams on `VideoCapture` / `VideoWriter`.

use std::path::Path;

use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, VideoWriter};
use tracing::warn;

use super::convert::{frame_to_mat, mat_to_frame};
use super::{OpenCvError, path_str};
use crate::config::FourCc;
use crate::frame::Frame;
use crate::integration::video::{VideoBackend, VideoInfo, VideoSink, VideoSource};

/// Decoder over a video file.
pub struct CaptureSource {
    capture: VideoCapture,
    info: VideoInfo,
    buffer: Mat,
}

impl CaptureSource {
    pub fn open(path: &Path) -> Result<Self, OpenCvError> {
        let capture = VideoCapture::from_file(path_str(path)?, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(OpenCvError::Open(path.to_path_buf()));
        }

        let count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?;
        let info = VideoInfo {
            width: capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32,
            height: capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32,
            fps: capture.get(videoio::CAP_PROP_FPS)?,
            frame_count: (count > 0.0).then_some(count as u64),
        };
        Ok(Self {
            capture,
            info,
            buffer: Mat::default(),
        })
    }
}

impl VideoSource for CaptureSource {
    type Error = OpenCvError;

    fn info(&self) -> VideoInfo {
        self.info
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
        if !self.capture.read(&mut self.buffer)? || self.buffer.empty() {
            return Ok(None);
        }
        mat_to_frame(&self.buffer).map(Some)
    }
}

impl Drop for CaptureSource {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            warn!("Failed to release video capture: {}", e);
        }
    }
}

/// Encoder writing a video file.
pub struct WriterSink {
    writer: VideoWriter,
}

impl WriterSink {
    pub fn create(path: &Path, info: &VideoInfo, codec: FourCc) -> Result<Self, OpenCvError> {
        let [c1, c2, c3, c4] = codec.chars();
        let fourcc = VideoWriter::fourcc(c1, c2, c3, c4)?;
        let size = Size::new(info.width as i32, info.height as i32);
        let writer = VideoWriter::new(path_str(path)?, fourcc, info.fps, size, true)?;
        if !writer.is_opened()? {
            return Err(OpenCvError::Open(path.to_path_buf()));
        }
        Ok(Self { writer })
    }
}

impl VideoSink for WriterSink {
    type Error = OpenCvError;

    fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        let mat = frame_to_mat(frame)?;
        self.writer.write(&mat)?;
        Ok(())
    }
}

impl Drop for WriterSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.release() {
            warn!("Failed to release video writer: {}", e);
        }
    }
}

/// Opens [`CaptureSource`]s and [`WriterSink`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCvVideo;

impl VideoBackend for OpenCvVideo {
    type Source = CaptureSource;
    type Sink = WriterSink;
    type Error = OpenCvError;

    fn open_input(&self, path: &Path) -> Result<Self::Source, Self::Error> {
        CaptureSource::open(path)
    }

    fn open_output(
        &self,
        path: &Path,
        info: &VideoInfo,
        codec: FourCc,
    ) -> Result<Self::Sink, Self::Error> {
        WriterSink::create(path, info, codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = OpenCvVideo.open_input(&dir.path().join("missing.mp4"));
        assert!(result.is_err());
    }
}
