//! Body joints and per-frame joint positions.

use std::collections::BTreeMap;

use nalgebra::{Point2, Point3};

/// Body keypoint, in COCO keypoint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    pub const ALL: [Joint; 17] = [
        Joint::Nose,
        Joint::LeftEye,
        Joint::RightEye,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Map a COCO keypoint index (0 = nose ... 16 = right ankle).
    pub fn from_coco_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Pose estimator output: joints in normalized image coordinates.
///
/// `x` and `y` are fractions of the frame width and height; `z` is the
/// estimator's relative depth, 0 when it only produces 2D keypoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseLandmarks {
    landmarks: BTreeMap<Joint, Point3<f32>>,
}

impl PoseLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, joint: Joint, x: f32, y: f32, z: f32) {
        self.landmarks.insert(joint, Point3::new(x, y, z));
    }

    pub fn get(&self, joint: Joint) -> Option<&Point3<f32>> {
        self.landmarks.get(&joint)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, &Point3<f32>)> {
        self.landmarks.iter().map(|(j, p)| (*j, p))
    }
}

/// Pixel positions of the joints detected in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointSnapshot {
    joints: BTreeMap<Joint, Point2<f32>>,
}

impl JointSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale normalized landmarks to pixel coordinates, dropping depth.
    pub fn from_landmarks(landmarks: &PoseLandmarks, width: f32, height: f32) -> Self {
        landmarks
            .iter()
            .map(|(joint, p)| (joint, Point2::new(p.x * width, p.y * height)))
            .collect()
    }

    /// Builder-style insert.
    pub fn with(mut self, joint: Joint, x: f32, y: f32) -> Self {
        self.joints.insert(joint, Point2::new(x, y));
        self
    }

    pub fn get(&self, joint: Joint) -> Option<&Point2<f32>> {
        self.joints.get(&joint)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

impl FromIterator<(Joint, Point2<f32>)> for JointSnapshot {
    fn from_iter<I: IntoIterator<Item = (Joint, Point2<f32>)>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coco_index() {
        assert_eq!(Joint::from_coco_index(0), Some(Joint::Nose));
        assert_eq!(Joint::from_coco_index(9), Some(Joint::LeftWrist));
        assert_eq!(Joint::from_coco_index(16), Some(Joint::RightAnkle));
        assert_eq!(Joint::from_coco_index(17), None);
    }

    #[test]
    fn test_from_landmarks_scales_to_pixels() {
        let mut landmarks = PoseLandmarks::new();
        landmarks.insert(Joint::Nose, 0.5, 0.25, -0.1);
        landmarks.insert(Joint::LeftAnkle, 0.1, 0.9, 0.0);

        let snapshot = JointSnapshot::from_landmarks(&landmarks, 640.0, 480.0);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(Joint::Nose), Some(&Point2::new(320.0, 120.0)));
        let ankle = snapshot.get(Joint::LeftAnkle).unwrap();
        assert!((ankle.x - 64.0).abs() < 1e-4);
        assert!((ankle.y - 432.0).abs() < 1e-4);
        assert!(snapshot.get(Joint::RightAnkle).is_none());
    }
}
