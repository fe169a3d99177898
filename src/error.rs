//! Error types for the annotation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Type-erased collaborator error (decoder, encoder, detector, tracker).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline run.
///
/// Detector, pose and tracker failures never show up here: they are folded
/// into the anomaly counter or dropped where they happen.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to open input video {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to open output video {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to write frame {index}: {source}")]
    Encode {
        index: u64,
        #[source]
        source: BoxError,
    },

    #[error("failed to write summary to {}: {source}", path.display())]
    SummaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    SummarySerialize(#[from] serde_json::Error),
}

impl PipelineError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Errors building a [`Frame`](crate::frame::Frame) from raw pixel data.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("pixel buffer holds {actual} bytes, {width}x{height} BGR needs {expected}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("expected 3 color channels, got {0}")]
    Channels(usize),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
