use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Coarse body activity derived from joint motion between two detection cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLabel {
    /// No pose in the current frame.
    Unknown,
    /// Implausible motion spike, counted apart from activities.
    Anomaly,
    HandsUp,
    Walking,
    MovingHands,
    Dancing,
    Stopped,
    WritingOrTyping,
    Moving,
}

impl ActivityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLabel::Unknown => "unknown",
            ActivityLabel::Anomaly => "anomaly",
            ActivityLabel::HandsUp => "hands_up",
            ActivityLabel::Walking => "walking",
            ActivityLabel::MovingHands => "moving_hands",
            ActivityLabel::Dancing => "dancing",
            ActivityLabel::Stopped => "stopped",
            ActivityLabel::WritingOrTyping => "writing_or_typing",
            ActivityLabel::Moving => "moving",
        }
    }

    #[inline]
    pub fn is_anomaly(&self) -> bool {
        matches!(self, ActivityLabel::Anomaly)
    }
}

/// Ordered by label name.
impl Ord for ActivityLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ActivityLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
