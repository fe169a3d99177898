//! Rule-based activity classification from two joint snapshots.

use nalgebra::{Point2, distance};

use crate::activity::joint::{Joint, JointSnapshot};
use crate::activity::label::ActivityLabel;

/// Motion thresholds in pixels, scaled to the frame height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub hand: f32,
    pub ankle: f32,
    pub dance: f32,
    pub anomaly: f32,
}

impl Thresholds {
    pub fn for_height(frame_height: f32) -> Self {
        Self {
            hand: frame_height * 0.02,
            ankle: frame_height * 0.015,
            dance: frame_height * 0.05,
            anomaly: frame_height * 0.15,
        }
    }
}

/// Displacement of the four limb joints between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LimbSpeeds {
    pub left_wrist: f32,
    pub right_wrist: f32,
    pub left_ankle: f32,
    pub right_ankle: f32,
}

impl LimbSpeeds {
    pub fn between(current: &JointSnapshot, previous: Option<&JointSnapshot>) -> Self {
        let speed = |joint| joint_speed(current, previous, joint);
        Self {
            left_wrist: speed(Joint::LeftWrist),
            right_wrist: speed(Joint::RightWrist),
            left_ankle: speed(Joint::LeftAnkle),
            right_ankle: speed(Joint::RightAnkle),
        }
    }

    #[inline]
    pub fn wrist(&self) -> f32 {
        (self.left_wrist + self.right_wrist) / 2.0
    }

    #[inline]
    pub fn ankle(&self) -> f32 {
        (self.left_ankle + self.right_ankle) / 2.0
    }

    #[inline]
    pub fn total(&self) -> f32 {
        self.left_wrist + self.right_wrist + self.left_ankle + self.right_ankle
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.left_wrist
            .max(self.right_wrist)
            .max(self.left_ankle)
            .max(self.right_ankle)
    }
}

/// Euclidean displacement of `joint`, 0 when either position is missing.
fn joint_speed(current: &JointSnapshot, previous: Option<&JointSnapshot>, joint: Joint) -> f32 {
    match (previous.and_then(|p| p.get(joint)), current.get(joint)) {
        (Some(before), Some(after)) => distance(before, after),
        _ => 0.0,
    }
}

/// Classify the activity seen between `previous` and `current`.
///
/// Rules are checked in a fixed order and the first match wins:
/// anomaly, hands up, walking, moving hands, dancing, stopped,
/// writing/typing, and finally moving.
pub fn classify(
    current: Option<&JointSnapshot>,
    previous: Option<&JointSnapshot>,
    frame_height: f32,
    frame_width: f32,
) -> ActivityLabel {
    let Some(current) = current else {
        return ActivityLabel::Unknown;
    };

    let speeds = LimbSpeeds::between(current, previous);
    let wrist_speed = speeds.wrist();
    let ankle_speed = speeds.ankle();
    let t = Thresholds::for_height(frame_height);

    if speeds.max() > t.anomaly {
        return ActivityLabel::Anomaly;
    }

    // Missing wrists sit at the origin; a missing nose at the frame center.
    let origin = Point2::origin();
    let left_wrist = current.get(Joint::LeftWrist).unwrap_or(&origin);
    let right_wrist = current.get(Joint::RightWrist).unwrap_or(&origin);
    let nose_y = current
        .get(Joint::Nose)
        .map_or(frame_height / 2.0, |nose| nose.y);

    if left_wrist.y < nose_y
        && right_wrist.y < nose_y
        && (left_wrist.x - right_wrist.x).abs() < frame_width * 0.2
    {
        return ActivityLabel::HandsUp;
    }

    if ankle_speed > t.ankle && wrist_speed < t.hand {
        return ActivityLabel::Walking;
    }

    if wrist_speed > t.hand && ankle_speed < t.ankle {
        return ActivityLabel::MovingHands;
    }

    if wrist_speed > t.dance && ankle_speed > t.dance {
        return ActivityLabel::Dancing;
    }

    if speeds.total() < t.hand * 2.0 {
        return ActivityLabel::Stopped;
    }

    let wrist_y = (left_wrist.y + right_wrist.y) / 2.0;
    if wrist_y > frame_height * 0.6 && wrist_speed < t.hand * 1.5 {
        return ActivityLabel::WritingOrTyping;
    }

    ActivityLabel::Moving
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 1000.0;
    const W: f32 = 1000.0;

    /// Upright body, wrists below the nose and far apart.
    fn standing(dx_wrist: f32, dy_wrist: f32, dx_ankle: f32) -> JointSnapshot {
        JointSnapshot::new()
            .with(Joint::Nose, 500.0, 200.0)
            .with(Joint::LeftWrist, 300.0 + dx_wrist, 500.0 + dy_wrist)
            .with(Joint::RightWrist, 700.0 + dx_wrist, 500.0 + dy_wrist)
            .with(Joint::LeftAnkle, 400.0 + dx_ankle, 950.0)
            .with(Joint::RightAnkle, 600.0 + dx_ankle, 950.0)
    }

    #[test]
    fn test_thresholds_scale_with_height() {
        let t = Thresholds::for_height(H);
        assert!((t.hand - 20.0).abs() < 1e-4);
        assert!((t.ankle - 15.0).abs() < 1e-4);
        assert!((t.dance - 50.0).abs() < 1e-4);
        assert!((t.anomaly - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_current_pose_is_unknown() {
        let prev = standing(0.0, 0.0, 0.0);
        assert_eq!(classify(None, Some(&prev), H, W), ActivityLabel::Unknown);
        assert_eq!(classify(None, None, H, W), ActivityLabel::Unknown);
    }

    #[test]
    fn test_missing_joint_has_zero_speed() {
        let prev = JointSnapshot::new().with(Joint::LeftWrist, 0.0, 0.0);
        let cur = JointSnapshot::new().with(Joint::RightWrist, 900.0, 900.0);
        let speeds = LimbSpeeds::between(&cur, Some(&prev));
        assert_eq!(speeds, LimbSpeeds::default());
    }

    #[test]
    fn test_still_pose_is_stopped() {
        let pose = standing(0.0, 0.0, 0.0);
        assert_eq!(classify(Some(&pose), Some(&pose), H, W), ActivityLabel::Stopped);
        // First detection cycle has nothing to compare against.
        assert_eq!(classify(Some(&pose), None, H, W), ActivityLabel::Stopped);
    }

    #[test]
    fn test_walking() {
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(0.0, 0.0, 40.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::Walking);
    }

    #[test]
    fn test_walking_wins_over_stopped() {
        // Ankles move 16px (> 15 ankle threshold), wrists still: raw total 32 < 40.
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(0.0, 0.0, 16.0);
        let speeds = LimbSpeeds::between(&cur, Some(&prev));
        assert!(speeds.total() < Thresholds::for_height(H).hand * 2.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::Walking);
    }

    #[test]
    fn test_moving_hands() {
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(30.0, 0.0, 0.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::MovingHands);
    }

    #[test]
    fn test_dancing() {
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(0.0, 100.0, 100.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::Dancing);
    }

    #[test]
    fn test_anomaly_beats_dancing() {
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(0.0, 100.0, 100.0).with(Joint::RightAnkle, 600.0 + 200.0, 950.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::Anomaly);
    }

    #[test]
    fn test_anomaly_beats_hands_up() {
        let prev = JointSnapshot::new()
            .with(Joint::Nose, 500.0, 500.0)
            .with(Joint::LeftWrist, 450.0, 900.0)
            .with(Joint::RightWrist, 550.0, 900.0);
        let cur = JointSnapshot::new()
            .with(Joint::Nose, 500.0, 500.0)
            .with(Joint::LeftWrist, 450.0, 100.0)
            .with(Joint::RightWrist, 550.0, 100.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::Anomaly);
    }

    #[test]
    fn test_hands_up() {
        let pose = JointSnapshot::new()
            .with(Joint::Nose, 500.0, 300.0)
            .with(Joint::LeftWrist, 450.0, 100.0)
            .with(Joint::RightWrist, 550.0, 120.0);
        assert_eq!(classify(Some(&pose), Some(&pose), H, W), ActivityLabel::HandsUp);
    }

    #[test]
    fn test_hands_up_needs_close_wrists() {
        // Wrists above the nose but 400px apart (limit is 0.2 * 1000).
        let pose = JointSnapshot::new()
            .with(Joint::Nose, 500.0, 300.0)
            .with(Joint::LeftWrist, 300.0, 100.0)
            .with(Joint::RightWrist, 700.0, 100.0);
        assert_eq!(classify(Some(&pose), Some(&pose), H, W), ActivityLabel::Stopped);
    }

    #[test]
    fn test_missing_nose_defaults_to_frame_center() {
        let pose = JointSnapshot::new()
            .with(Joint::LeftWrist, 480.0, 400.0)
            .with(Joint::RightWrist, 520.0, 400.0);
        assert_eq!(classify(Some(&pose), None, H, W), ActivityLabel::HandsUp);

        let low = JointSnapshot::new()
            .with(Joint::LeftWrist, 480.0, 600.0)
            .with(Joint::RightWrist, 520.0, 600.0);
        assert_eq!(classify(Some(&low), None, H, W), ActivityLabel::Stopped);
    }

    #[test]
    fn test_nose_only_pose_is_hands_up() {
        // Both wrists fall back to the origin, above the nose and 0px apart.
        let pose = JointSnapshot::new().with(Joint::Nose, 500.0, 300.0);
        assert_eq!(classify(Some(&pose), None, H, W), ActivityLabel::HandsUp);
        assert_eq!(classify(Some(&pose), Some(&pose), H, W), ActivityLabel::HandsUp);
    }

    #[test]
    fn test_writing_or_typing() {
        // Wrists low (y = 700 > 600) moving 25px: too fast for "stopped",
        // ankles moving 20px so neither walking nor moving hands applies.
        let prev = standing(0.0, 200.0, 0.0);
        let cur = standing(25.0, 200.0, 20.0);
        assert_eq!(
            classify(Some(&cur), Some(&prev), H, W),
            ActivityLabel::WritingOrTyping
        );
    }

    #[test]
    fn test_moving_fallback() {
        // Same motion as writing/typing but with wrists at chest height.
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(25.0, 0.0, 20.0);
        assert_eq!(classify(Some(&cur), Some(&prev), H, W), ActivityLabel::Moving);
    }

    #[test]
    fn test_deterministic() {
        let prev = standing(0.0, 0.0, 0.0);
        let cur = standing(25.0, 0.0, 20.0);
        let first = classify(Some(&cur), Some(&prev), H, W);
        for _ in 0..10 {
            assert_eq!(classify(Some(&cur), Some(&prev), H, W), first);
        }
    }
}
