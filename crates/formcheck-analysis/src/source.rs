//! Interfaces to the external collaborators of an analysis run.
//!
//! The pipeline owns a [`FrameDecoder`] for the duration of a run and
//! releases it on every exit path. Frames are handed to the
//! [`PoseEstimator`] strictly in temporal order.

use async_trait::async_trait;
use formcheck_models::PoseFrame;

use crate::error::CollaboratorError;

/// An opened video that can be seeked and decoded.
#[async_trait]
pub trait FrameDecoder: Send {
    /// Decoded image type handed to the pose estimator.
    type Frame: Send + Sync;

    /// Length of the video in seconds.
    fn duration_secs(&self) -> f64;

    /// Seek to `timestamp` (within `[0, duration]`) and decode that frame.
    async fn frame_at(&mut self, timestamp: f64) -> Result<Self::Frame, CollaboratorError>;

    /// Free decoder resources. Called exactly once by the pipeline.
    fn release(&mut self);
}

/// Extracts body landmarks from a decoded frame.
///
/// May keep tracking state between calls.
#[async_trait]
pub trait PoseEstimator<F: Send + Sync>: Send {
    /// Landmarks for one frame, or `None` when no body was found.
    async fn estimate(&mut self, frame: &F) -> Result<Option<PoseFrame>, CollaboratorError>;
}
