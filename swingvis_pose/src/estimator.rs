use anyhow::Result;
use nalgebra::Point3;

/// A single decoded video frame handed to the pose estimator: a borrowed
/// pixel buffer plus its dimensions. The analysis never inspects the pixels
/// itself.
#[derive(Debug, Clone, Copy)]
pub struct VideoFrame<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Stream-level properties reported by the decode collaborator.
#[derive(Debug, Clone, Copy)]
pub struct VideoMetadata {
    pub fps: f32,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

/// One joint as reported by the estimator: its landmark index in the
/// estimator's own skeleton enumeration, a position in normalized
/// coordinates (z is relative depth with no guaranteed scale), and the
/// estimator's confidence that the joint is correctly located.
#[derive(Debug, Clone, Copy)]
pub struct RawJoint {
    pub index: u32,
    pub position: Point3<f32>,
    pub visibility: f32,
}

/// The pose-estimation collaborator. Implementations own whatever model
/// state the backing estimator needs; construct one before the first frame
/// and drop it after the last.
pub trait PoseEstimator {
    /// Runs pose detection on a single frame. `Ok(None)` means no person
    /// was detected in the frame, which is a normal outcome; only estimator
    /// failures surface as errors.
    fn detect(&mut self, frame: &VideoFrame) -> Result<Option<Vec<RawJoint>>>;
}

/// The video-decode collaborator: an ordered sequence of decoded frames
/// plus stream metadata. Opening a missing or unreadable source must fail
/// when the source is constructed, not present itself as an empty stream.
pub trait FrameSource {
    fn metadata(&self) -> VideoMetadata;

    /// The next decoded frame buffer, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>>;
}
