pub mod estimator;
pub mod landmarks;

pub use estimator::{FrameSource, PoseEstimator, RawJoint, VideoFrame, VideoMetadata};
pub use landmarks::{FrameLandmarks, JointName, Landmark};
