//! Detection of the four temporal checkpoints of a swing (address,
//! backswing top, impact, finish) inside a caller-supplied frame window.
//!
//! The searches run on the already-enriched frame records: impact is the
//! combined-wrist-speed maximum, address and finish are total-motion minima
//! on either side of it. Sparse motion data degrades via defaults (missing
//! wrist speeds count as zero, missing total motion as +inf) rather than
//! failing.

use log::debug;
use serde::Serialize;

use crate::analysis::FrameRecord;
use crate::util::{arg_max, arg_min};

/// Inclusive frame range `[start, end]` of one swing within the full
/// sequence, supplied by an upstream swing-segmentation stage.
#[derive(Debug, Clone, Copy)]
pub struct SwingWindow {
    pub start: usize,
    pub end: usize,
}

/// The four checkpoints of a swing, as absolute frame indices into the
/// full sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyEvents {
    pub address: usize,
    pub backswing_top: usize,
    pub impact: usize,
    pub finish: usize,
}

#[derive(Debug, Clone)]
pub struct EventDetectionParameters {
    /// Fraction of the window length skipped past impact before the finish
    /// search begins, so that a momentary stillness right after ball
    /// contact is not mistaken for the finish position.
    pub finish_search_fraction: f32,
}

impl Default for EventDetectionParameters {
    fn default() -> Self {
        Self {
            finish_search_fraction: 0.1,
        }
    }
}

/// Locates the swing checkpoints inside `window`. Returns `None` only when
/// the window contains no frames (inverted bounds or entirely outside the
/// sequence); any other input produces a result.
pub fn detect_key_events(
    records: &[FrameRecord],
    window: &SwingWindow,
    params: &EventDetectionParameters,
) -> Option<KeyEvents> {
    if window.start >= records.len() || window.start > window.end {
        return None;
    }
    let end = usize::min(window.end, records.len() - 1);
    let swing = &records[window.start..=end];

    // impact: fastest combined wrist movement over the whole window
    let wrist_speeds = swing
        .iter()
        .map(|r| r.wrist_speed_sum())
        .collect::<Vec<f32>>();
    let impact = arg_max(&wrist_speeds).unwrap_or(swing.len() / 2);

    let total_motion = swing
        .iter()
        .map(|r| r.total_motion_or_inf())
        .collect::<Vec<f32>>();

    // address: stillest frame before impact
    let address = arg_min(&total_motion[..impact]).unwrap_or(0);

    // finish: stillest frame from a little past impact onwards
    let finish_search_start = usize::min(
        impact + (params.finish_search_fraction * swing.len() as f32) as usize,
        swing.len() - 1,
    );
    let finish = arg_min(&total_motion[finish_search_start..])
        .map(|i| finish_search_start + i)
        .unwrap_or(swing.len() - 1);

    // top of the backswing: midpoint between address and impact. This is a
    // coarse heuristic that inspects no signal at all and misjudges swings
    // with asymmetric backswing/downswing timing; kept because downstream
    // consumers are calibrated against it.
    let backswing_top = (address + impact) / 2;

    debug!(
        "key events (local): address={address} backswing_top={backswing_top} \
         impact={impact} finish={finish}"
    );

    Some(KeyEvents {
        address: window.start + address,
        backswing_top: window.start + backswing_top,
        impact: window.start + impact,
        finish: window.start + finish,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use swingvis_pose::{FrameLandmarks, JointName};

    fn record(frame_idx: usize, wrist_speed: f32, total_motion: f32) -> FrameRecord {
        let mut joint_speeds = HashMap::new();
        joint_speeds.insert(JointName::LeftWrist, wrist_speed);
        FrameRecord {
            frame_idx,
            landmarks: FrameLandmarks::default(),
            quality: 0.0,
            joint_speeds,
            total_motion: Some(total_motion),
        }
    }

    fn records(wrist_speeds: &[f32], total_motion: &[f32]) -> Vec<FrameRecord> {
        wrist_speeds
            .iter()
            .zip(total_motion.iter())
            .enumerate()
            .map(|(i, (w, t))| record(i, *w, *t))
            .collect()
    }

    #[test]
    fn test_detects_checkpoints_in_ten_frame_window() {
        let records = records(
            &[0.0, 0.0, 1.0, 2.0, 9.0, 3.0, 1.0, 0.0, 0.0, 0.0],
            &[0.0, 0.1, 0.2, 1.0, 5.0, 4.0, 0.3, 0.1, 0.05, 0.05],
        );
        let window = SwingWindow { start: 0, end: 9 };
        let events =
            detect_key_events(&records, &window, &EventDetectionParameters::default()).unwrap();

        assert_eq!(events.impact, 4);
        assert_eq!(events.address, 0);
        assert_eq!(events.finish, 8);
        assert_eq!(events.backswing_top, 2);
    }

    #[test]
    fn test_window_offset_yields_absolute_indices() {
        let mut all = records(&[0.0; 5], &[f32::INFINITY; 5]);
        all.extend(records(
            &[0.0, 0.0, 1.0, 2.0, 9.0, 3.0, 1.0, 0.0, 0.0, 0.0],
            &[0.0, 0.1, 0.2, 1.0, 5.0, 4.0, 0.3, 0.1, 0.05, 0.05],
        ));
        all.extend(records(&[0.0; 5], &[f32::INFINITY; 5]));
        let window = SwingWindow { start: 5, end: 14 };
        let events =
            detect_key_events(&all, &window, &EventDetectionParameters::default()).unwrap();

        assert_eq!(events.impact, 9);
        assert_eq!(events.address, 5);
        assert_eq!(events.finish, 13);
        assert_eq!(events.backswing_top, 7);
    }

    #[test]
    fn test_empty_window_yields_nothing() {
        let records = records(&[1.0, 2.0, 3.0], &[0.1, 0.2, 0.3]);
        let params = EventDetectionParameters::default();

        let inverted = SwingWindow { start: 5, end: 3 };
        assert!(detect_key_events(&records, &inverted, &params).is_none());

        let out_of_bounds = SwingWindow { start: 10, end: 20 };
        assert!(detect_key_events(&records, &out_of_bounds, &params).is_none());
    }

    #[test]
    fn test_window_end_is_clamped_to_sequence() {
        let records = records(&[0.0, 5.0, 0.0], &[0.1, 1.0, 0.2]);
        let window = SwingWindow { start: 0, end: 100 };
        let events =
            detect_key_events(&records, &window, &EventDetectionParameters::default()).unwrap();

        assert_eq!(events.impact, 1);
    }

    #[test]
    fn test_impact_at_window_start_defaults_address_to_start() {
        let records = records(&[9.0, 1.0, 0.5, 0.2], &[5.0, 1.0, 0.5, 0.1]);
        let window = SwingWindow { start: 0, end: 3 };
        let events =
            detect_key_events(&records, &window, &EventDetectionParameters::default()).unwrap();

        assert_eq!(events.impact, 0);
        assert_eq!(events.address, 0);
        assert_eq!(events.backswing_top, 0);
    }

    #[test]
    fn test_missing_motion_values_are_never_preferred() {
        // frame 1 has no computed total motion; the address search must
        // pick frame 0 over it even though 0.4 is not small
        let mut recs = records(&[0.0, 0.0, 9.0, 0.0], &[0.4, 0.0, 5.0, 0.1]);
        recs[1].total_motion = None;
        let window = SwingWindow { start: 0, end: 3 };
        let events =
            detect_key_events(&recs, &window, &EventDetectionParameters::default()).unwrap();

        assert_eq!(events.address, 0);
    }

    #[test]
    fn test_event_ordering_invariant() {
        let records = records(
            &[0.1, 0.2, 0.5, 1.5, 4.0, 8.0, 2.0, 0.5, 0.2, 0.1, 0.1, 0.1],
            &[0.05, 0.1, 0.4, 1.0, 2.0, 3.0, 2.5, 1.0, 0.5, 0.2, 0.1, 0.05],
        );
        let window = SwingWindow { start: 0, end: 11 };
        let events =
            detect_key_events(&records, &window, &EventDetectionParameters::default()).unwrap();

        assert!(window.start <= events.address);
        assert!(events.address <= events.backswing_top);
        assert!(events.backswing_top <= events.impact);
        assert!(events.impact <= events.finish);
        assert!(events.finish <= window.end);
    }
}
