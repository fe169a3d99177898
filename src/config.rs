//! Pipeline configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Four-character video codec code, e.g. `mp4v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FourCc([u8; 4]);

impl FourCc {
    pub const MP4V: FourCc = FourCc(*b"mp4v");

    pub fn chars(&self) -> [char; 4] {
        self.0.map(char::from)
    }
}

impl Default for FourCc {
    fn default() -> Self {
        Self::MP4V
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for FourCc {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| {
                PipelineError::invalid_config(format!("codec must be 4 characters, got {s:?}"))
            })?;
        if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return Err(PipelineError::invalid_config(format!(
                "codec must be printable ASCII, got {s:?}"
            )));
        }
        Ok(FourCc(bytes))
    }
}

impl TryFrom<String> for FourCc {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<FourCc> for String {
    fn from(codec: FourCc) -> Self {
        codec.to_string()
    }
}

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run full face and pose detection on every N-th frame; track in between.
    pub detect_every_n: u32,
    /// Output video codec.
    pub codec: FourCc,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detect_every_n: 10,
            codec: FourCc::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.detect_every_n == 0 {
            return Err(PipelineError::invalid_config(
                "detect_every_n must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Which face localisation model the analyzer adapter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceBackend {
    /// YuNet CNN face detector.
    #[default]
    Yunet,
    /// Haar cascade.
    Haar,
}

impl FromStr for FaceBackend {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yunet" => Ok(FaceBackend::Yunet),
            "haar" => Ok(FaceBackend::Haar),
            other => Err(PipelineError::invalid_config(format!(
                "unknown face detector backend {other:?} (expected yunet or haar)"
            ))),
        }
    }
}

impl fmt::Display for FaceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceBackend::Yunet => f.write_str("yunet"),
            FaceBackend::Haar => f.write_str("haar"),
        }
    }
}

/// Visual tracker algorithm used between detection cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    /// Discriminative correlation filter with channel and spatial reliability.
    #[default]
    Csrt,
    /// Kernelized correlation filter, faster and less accurate.
    Kcf,
}

impl FromStr for TrackerKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csrt" => Ok(TrackerKind::Csrt),
            "kcf" => Ok(TrackerKind::Kcf),
            other => Err(PipelineError::invalid_config(format!(
                "unknown tracker {other:?} (expected csrt or kcf)"
            ))),
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerKind::Csrt => f.write_str("csrt"),
            TrackerKind::Kcf => f.write_str("kcf"),
        }
    }
}
