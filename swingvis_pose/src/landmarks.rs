use log::trace;
use nalgebra::Point3;
use serde::Serialize;
use std::collections::HashMap;

use crate::estimator::RawJoint;

/// The twelve joints used by all downstream analysis. This set is closed:
/// anything else the estimator reports is discarded by the landmark filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
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

impl JointName {
    pub const ALL: [JointName; 12] = [
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftWrist,
        JointName::RightWrist,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::LeftAnkle,
        JointName::RightAnkle,
    ];

    /// Maps the estimator's landmark index to a tracked joint. The full-body
    /// skeleton enumerates 33 landmarks; only these twelve are of interest.
    pub fn from_estimator_index(index: u32) -> Option<JointName> {
        match index {
            11 => Some(JointName::LeftShoulder),
            12 => Some(JointName::RightShoulder),
            13 => Some(JointName::LeftElbow),
            14 => Some(JointName::RightElbow),
            15 => Some(JointName::LeftWrist),
            16 => Some(JointName::RightWrist),
            23 => Some(JointName::LeftHip),
            24 => Some(JointName::RightHip),
            25 => Some(JointName::LeftKnee),
            26 => Some(JointName::RightKnee),
            27 => Some(JointName::LeftAnkle),
            28 => Some(JointName::RightAnkle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::LeftShoulder => "left_shoulder",
            JointName::RightShoulder => "right_shoulder",
            JointName::LeftElbow => "left_elbow",
            JointName::RightElbow => "right_elbow",
            JointName::LeftWrist => "left_wrist",
            JointName::RightWrist => "right_wrist",
            JointName::LeftHip => "left_hip",
            JointName::RightHip => "right_hip",
            JointName::LeftKnee => "left_knee",
            JointName::RightKnee => "right_knee",
            JointName::LeftAnkle => "left_ankle",
            JointName::RightAnkle => "right_ankle",
        }
    }
}

/// One tracked anatomical point for one frame: position in the estimator's
/// normalized coordinate space and the estimator's own visibility
/// confidence in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub position: Point3<f32>,
    pub visibility: f32,
}

/// The landmarks of a single frame, reduced to the tracked joint set. May
/// be empty (no detection) or partial (some joints missing); downstream
/// analysis degrades gracefully in both cases.
#[derive(Debug, Clone, Default)]
pub struct FrameLandmarks {
    joints: HashMap<JointName, Landmark>,
}

impl FrameLandmarks {
    /// The landmark filter: reduces raw estimator output to the tracked
    /// joint set. A frame with no detection maps to the empty set, not an
    /// error.
    pub fn from_raw(raw: &[RawJoint]) -> Self {
        let joints = raw
            .iter()
            .filter_map(|j| {
                JointName::from_estimator_index(j.index).map(|name| {
                    (
                        name,
                        Landmark {
                            position: j.position,
                            visibility: j.visibility,
                        },
                    )
                })
            })
            .collect::<HashMap<_, _>>();
        trace!("kept {} of {} raw joints", joints.len(), raw.len());

        Self { joints }
    }

    pub fn get(&self, joint: JointName) -> Option<&Landmark> {
        self.joints.get(&joint)
    }

    pub fn contains(&self, joint: JointName) -> bool {
        self.joints.contains_key(&joint)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointName, &Landmark)> {
        self.joints.iter().map(|(name, lm)| (*name, lm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(index: u32, x: f32) -> RawJoint {
        RawJoint {
            index,
            position: Point3::new(x, 0.5, 0.0),
            visibility: 0.9,
        }
    }

    #[test]
    fn test_filter_keeps_only_tracked_joints() {
        // nose (0) and left eye (2) are not part of the tracked set
        let raw_joints = vec![raw(0, 0.1), raw(2, 0.2), raw(15, 0.3), raw(28, 0.4)];
        let landmarks = FrameLandmarks::from_raw(&raw_joints);

        assert_eq!(landmarks.len(), 2);
        assert!(landmarks.contains(JointName::LeftWrist));
        assert!(landmarks.contains(JointName::RightAnkle));
    }

    #[test]
    fn test_filter_of_no_detection_is_empty() {
        let landmarks = FrameLandmarks::from_raw(&[]);
        assert!(landmarks.is_empty());
    }

    #[test]
    fn test_estimator_index_round_trip() {
        for name in JointName::ALL {
            let index = match name {
                JointName::LeftShoulder => 11,
                JointName::RightShoulder => 12,
                JointName::LeftElbow => 13,
                JointName::RightElbow => 14,
                JointName::LeftWrist => 15,
                JointName::RightWrist => 16,
                JointName::LeftHip => 23,
                JointName::RightHip => 24,
                JointName::LeftKnee => 25,
                JointName::RightKnee => 26,
                JointName::LeftAnkle => 27,
                JointName::RightAnkle => 28,
            };
            assert_eq!(JointName::from_estimator_index(index), Some(name));
        }
        assert_eq!(JointName::from_estimator_index(17), None);
    }
}
