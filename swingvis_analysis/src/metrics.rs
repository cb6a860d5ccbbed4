//! Posture angles and swing-level summary metrics layered on top of the
//! checkpoint detection.

use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::analysis::FrameRecord;
use crate::events::KeyEvents;
use swingvis_pose::{FrameLandmarks, JointName};

/// Angle at `b` formed by the segments b→a and b→c, in degrees. `None`
/// when either segment has zero length.
pub fn joint_angle(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Option<f32> {
    let ba = a - b;
    let bc = c - b;
    let denom = ba.norm() * bc.norm();
    if denom == 0.0 {
        return None;
    }
    let cos = (ba.dot(&bc) / denom).clamp(-1.0, 1.0);

    Some(cos.acos().to_degrees())
}

/// Inclination of the line p1→p2 against the horizontal image axis, in
/// degrees. Uses x/y only; depth does not affect how level a joint pair
/// appears on screen.
pub fn inclination(p1: &Point3<f32>, p2: &Point3<f32>) -> f32 {
    (p1.y - p2.y).atan2(p1.x - p2.x).to_degrees()
}

/// Posture angles for a single frame. Each angle degrades independently:
/// a missing or degenerate joint drops that angle only.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FrameAngles {
    /// Elbow extension, shoulder–elbow–wrist.
    pub left_arm: Option<f32>,
    pub right_arm: Option<f32>,
    /// Knee extension, hip–knee–ankle.
    pub left_leg: Option<f32>,
    pub right_leg: Option<f32>,
    /// Shoulder line against the right hip.
    pub shoulder_line: Option<f32>,
    pub shoulders_inclination: Option<f32>,
    pub hips_inclination: Option<f32>,
}

impl FrameAngles {
    pub fn from_landmarks(landmarks: &FrameLandmarks) -> Self {
        let pos = |j: JointName| landmarks.get(j).map(|lm| lm.position);
        let angle3 = |a: JointName, b: JointName, c: JointName| match (pos(a), pos(b), pos(c)) {
            (Some(a), Some(b), Some(c)) => joint_angle(&a, &b, &c),
            _ => None,
        };
        let incline = |a: JointName, b: JointName| match (pos(a), pos(b)) {
            (Some(a), Some(b)) => Some(inclination(&a, &b)),
            _ => None,
        };

        Self {
            left_arm: angle3(JointName::LeftShoulder, JointName::LeftElbow, JointName::LeftWrist),
            right_arm: angle3(
                JointName::RightShoulder,
                JointName::RightElbow,
                JointName::RightWrist,
            ),
            left_leg: angle3(JointName::LeftHip, JointName::LeftKnee, JointName::LeftAnkle),
            right_leg: angle3(JointName::RightHip, JointName::RightKnee, JointName::RightAnkle),
            shoulder_line: angle3(
                JointName::LeftShoulder,
                JointName::RightShoulder,
                JointName::RightHip,
            ),
            shoulders_inclination: incline(JointName::LeftShoulder, JointName::RightShoulder),
            hips_inclination: incline(JointName::LeftHip, JointName::RightHip),
        }
    }
}

/// Swing-level summary metrics derived from the detected checkpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SwingMetrics {
    /// Backswing-to-downswing duration ratio; `0.0` when the downswing
    /// span is empty.
    pub tempo: f32,
    /// Absolute difference between the backswing and downswing plane
    /// angles, in degrees; smaller means a more consistent plane. `None`
    /// when the right wrist was not tracked at one of the checkpoints.
    pub plane_consistency: Option<f32>,
}

pub fn swing_metrics(records: &[FrameRecord], events: &KeyEvents) -> SwingMetrics {
    SwingMetrics {
        tempo: swing_tempo(events),
        plane_consistency: plane_consistency(records, events),
    }
}

/// Ratio of backswing to downswing duration, in frames.
pub fn swing_tempo(events: &KeyEvents) -> f32 {
    let backswing = events.backswing_top.saturating_sub(events.address);
    let downswing = events.impact.saturating_sub(events.backswing_top);
    if downswing == 0 {
        return 0.0;
    }

    backswing as f32 / downswing as f32
}

/// Plane consistency: the right-wrist path angle against the ground
/// normal, compared between address→top and top→impact.
pub fn plane_consistency(records: &[FrameRecord], events: &KeyEvents) -> Option<f32> {
    let backswing = swing_plane_angle(records, events.address, events.backswing_top)?;
    let downswing = swing_plane_angle(records, events.backswing_top, events.impact)?;

    Some((backswing - downswing).abs())
}

fn swing_plane_angle(records: &[FrameRecord], from: usize, to: usize) -> Option<f32> {
    let wrist = |idx: usize| {
        records
            .get(idx)
            .and_then(|r| r.landmarks.get(JointName::RightWrist))
            .map(|lm| lm.position)
    };
    let path = wrist(to)? - wrist(from)?;
    let norm = path.norm();
    if norm == 0.0 {
        return None;
    }
    let cos = (path.dot(&Vector3::y()) / norm).clamp(-1.0, 1.0);

    Some(cos.acos().to_degrees())
}
