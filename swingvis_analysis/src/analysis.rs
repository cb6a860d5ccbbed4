//! The per-video analysis pipeline over a filtered landmark sequence.
//!
//! Data flows strictly upward: landmarks → per-frame quality and joint
//! kinematics → motion signals → smoothed signals → event detection. Each
//! frame record is enriched in that order and treated as read-only once
//! the event detector consumes it.

use log::trace;
use std::collections::HashMap;

use swingvis_pose::{FrameLandmarks, JointName};

use crate::events::{self, EventDetectionParameters, KeyEvents, SwingWindow};
use crate::metrics::{self, SwingMetrics};
use crate::motion;

#[derive(Debug, Clone)]
pub struct AnalysisParameters {
    /// Width of the moving-average window applied to both motion signals.
    pub smoothing_window: usize,
    /// Parameters of the swing event search.
    pub event_config: EventDetectionParameters,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            event_config: EventDetectionParameters::default(),
        }
    }
}

/// One entry per decoded video frame, progressively enriched by the
/// pipeline.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    pub frame_idx: usize,
    pub landmarks: FrameLandmarks,
    /// Pose quality for this frame, in [0, 1].
    pub quality: f32,
    /// Instantaneous speed per joint present in both this frame and its
    /// predecessor. Joints missing on either side carry no entry; their
    /// speed is undefined for this frame, not zero.
    pub joint_speeds: HashMap<JointName, f32>,
    /// Smoothed total-body motion, `None` until the aggregator has run.
    pub total_motion: Option<f32>,
}

impl FrameRecord {
    /// Combined wrist speed used by the impact search. A missing wrist
    /// contributes zero.
    pub fn wrist_speed_sum(&self) -> f32 {
        let speed = |j| self.joint_speeds.get(&j).copied().unwrap_or(0.0);
        speed(JointName::LeftWrist) + speed(JointName::RightWrist)
    }

    /// Total-body motion for the stillness searches. Frames without a
    /// computed value are never chosen over frames with one.
    pub fn total_motion_or_inf(&self) -> f32 {
        self.total_motion.unwrap_or(f32::INFINITY)
    }
}

/// Everything derived from one video's landmark sequence: the enriched
/// per-frame records plus both motion signals, raw and smoothed.
#[derive(Debug, Clone, Default)]
pub struct SwingAnalysis {
    pub records: Vec<FrameRecord>,
    pub wrist_motion: Vec<f32>,
    pub wrist_motion_smoothed: Vec<f32>,
    pub total_motion: Vec<f32>,
    pub total_motion_smoothed: Vec<f32>,
}

/// Mean visibility over the tracked joints present in the frame. An empty
/// frame scores exactly `0.0`. All joints count equally; the score is the
/// estimator's own confidence averaged, nothing anatomical.
pub fn pose_quality(landmarks: &FrameLandmarks) -> f32 {
    if landmarks.is_empty() {
        return 0.0;
    }

    landmarks.iter().map(|(_, lm)| lm.visibility).sum::<f32>() / landmarks.len() as f32
}

/// Per-joint speed between two consecutive frames: 3D displacement over
/// elapsed time, for joints present in both frames only. An empty frame on
/// either side, or a zero `dt`, yields the empty map.
pub fn joint_speeds(
    prev: &FrameLandmarks,
    curr: &FrameLandmarks,
    dt: f32,
) -> HashMap<JointName, f32> {
    if prev.is_empty() || curr.is_empty() || dt == 0.0 {
        return HashMap::new();
    }

    curr.iter()
        .filter_map(|(joint, lm)| {
            prev.get(joint)
                .map(|prev_lm| (joint, (lm.position - prev_lm.position).norm() / dt))
        })
        .collect()
}

/// The analysis pipeline. Stateless across videos; one instance can be
/// reused for any number of independent sequences.
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    pub params: AnalysisParameters,
}

impl AnalysisState {
    pub fn new(params: AnalysisParameters) -> Self {
        Self { params }
    }

    /// Runs the full pipeline over an already-filtered landmark sequence.
    ///
    /// `fps` is the decode collaborator's frame rate; a non-positive value
    /// disables the kinematics (zero elapsed time is a defined no-op, and
    /// speeds would be meaningless anyway).
    pub fn analyze(&self, frames: Vec<FrameLandmarks>, fps: f32) -> SwingAnalysis {
        let frame_time = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        trace!(
            "analyzing {} frames at {fps} fps (frame time {frame_time}s)",
            frames.len()
        );

        let wrist_motion = motion::wrist_motion(&frames);
        let total_motion = motion::total_body_motion(&frames);
        let wrist_motion_smoothed = motion::smooth(&wrist_motion, self.params.smoothing_window);
        let total_motion_smoothed = motion::smooth(&total_motion, self.params.smoothing_window);

        let mut records: Vec<FrameRecord> = Vec::with_capacity(frames.len());
        for (i, landmarks) in frames.into_iter().enumerate() {
            let quality = pose_quality(&landmarks);
            let speeds = match records.last() {
                Some(prev) => joint_speeds(&prev.landmarks, &landmarks, frame_time),
                None => HashMap::new(),
            };
            records.push(FrameRecord {
                frame_idx: i,
                landmarks,
                quality,
                joint_speeds: speeds,
                total_motion: Some(total_motion_smoothed[i]),
            });
        }

        SwingAnalysis {
            records,
            wrist_motion,
            wrist_motion_smoothed,
            total_motion,
            total_motion_smoothed,
        }
    }

    /// Locates the swing checkpoints inside `window`; `None` if the window
    /// contains no frames.
    pub fn detect_events(&self, analysis: &SwingAnalysis, window: &SwingWindow) -> Option<KeyEvents> {
        events::detect_key_events(&analysis.records, window, &self.params.event_config)
    }

    /// Swing-level summary metrics for already-detected checkpoints.
    pub fn swing_metrics(&self, analysis: &SwingAnalysis, events: &KeyEvents) -> SwingMetrics {
        metrics::swing_metrics(&analysis.records, events)
    }
}
