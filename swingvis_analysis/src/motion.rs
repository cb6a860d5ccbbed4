//! Per-frame motion signals derived from consecutive landmark pairs.
//!
//! Both signals are index-aligned with the frame sequence and pin index 0
//! to `0.0`, since the first frame has no predecessor to diff against.

use itertools::Itertools;
use swingvis_pose::{FrameLandmarks, JointName};

/// Average 2D displacement of the two wrists between consecutive frames.
///
/// The x/y image plane only; relative depth is too noisy to be useful for
/// hand speed. A pair of frames contributes a value only if both wrists
/// are present in both frames, otherwise that index stays `0.0`.
pub fn wrist_motion(frames: &[FrameLandmarks]) -> Vec<f32> {
    let mut motion = vec![0.0; frames.len()];
    for (i, (prev, curr)) in frames.iter().tuple_windows().enumerate() {
        let wrists = (
            prev.get(JointName::LeftWrist),
            curr.get(JointName::LeftWrist),
            prev.get(JointName::RightWrist),
            curr.get(JointName::RightWrist),
        );
        if let (Some(pl), Some(cl), Some(pr), Some(cr)) = wrists {
            let dist_l = (cl.position.xy() - pl.position.xy()).norm();
            let dist_r = (cr.position.xy() - pr.position.xy()).norm();
            motion[i + 1] = (dist_l + dist_r) / 2.0;
        }
    }

    motion
}

/// Average 3D displacement over all tracked joints present in both of two
/// consecutive frames. The denominator is the number of qualifying joints,
/// so a partially occluded skeleton still produces a meaningful value; no
/// qualifying joints leaves the index at `0.0`.
pub fn total_body_motion(frames: &[FrameLandmarks]) -> Vec<f32> {
    let mut motion = vec![0.0; frames.len()];
    for (i, (prev, curr)) in frames.iter().tuple_windows().enumerate() {
        let mut total_dist = 0.0;
        let mut num_joints = 0;
        for joint in JointName::ALL {
            if let (Some(p), Some(c)) = (prev.get(joint), curr.get(joint)) {
                total_dist += (c.position - p.position).norm();
                num_joints += 1;
            }
        }
        if num_joints > 0 {
            motion[i + 1] = total_dist / num_joints as f32;
        }
    }

    motion
}

/// Centered moving average with a uniform kernel, same-mode convolution
/// semantics: output length equals input length, the denominator stays at
/// `window` even where the window overhangs a boundary, and for even
/// widths the extra tap sits before the center. Signals shorter than the
/// window are returned unchanged.
pub fn smooth(signal: &[f32], window: usize) -> Vec<f32> {
    if window == 0 || signal.len() < window {
        return signal.to_vec();
    }

    let lead = (window - 1) / 2;
    (0..signal.len())
        .map(|i| {
            let lo = (i + lead + 1).saturating_sub(window);
            let hi = usize::min(i + lead, signal.len() - 1);
            signal[lo..=hi].iter().sum::<f32>() / window as f32
        })
        .collect()
}
