//! Facial emotion vocabulary.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dominant facial emotion reported by the face analyzer.
///
/// Labels outside the vocabulary collapse to [`Emotion::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
    #[default]
    Unknown,
}

impl Emotion {
    /// Classifier output order of the common 7-class facial expression models.
    pub const CLASSES: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::Unknown => "unknown",
        }
    }

    /// Look up a class index of a 7-way emotion classifier.
    pub fn from_class_index(index: usize) -> Self {
        Self::CLASSES.get(index).copied().unwrap_or_default()
    }
}

/// Ordered by label name, so summary maps list emotions alphabetically.
impl Ord for Emotion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Emotion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let emotion = match s.trim().to_ascii_lowercase().as_str() {
            "angry" => Emotion::Angry,
            "disgust" => Emotion::Disgust,
            "fear" => Emotion::Fear,
            "happy" => Emotion::Happy,
            "sad" => Emotion::Sad,
            "surprise" => Emotion::Surprise,
            "neutral" => Emotion::Neutral,
            _ => Emotion::Unknown,
        };
        Ok(emotion)
    }
}

impl From<&str> for Emotion {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(emotion) => emotion,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Emotion {
    fn from(s: String) -> Self {
        Emotion::from(s.as_str())
    }
}
