//! Collaborators backed by landmarks that were already extracted.
//!
//! Clients that run pose estimation themselves upload one [`PoseFrame`] per
//! captured frame; these adapters replay them through the pipeline.

use async_trait::async_trait;
use formcheck_models::PoseFrame;
use tracing::debug;

use crate::error::CollaboratorError;
use crate::source::{FrameDecoder, PoseEstimator};

/// Evenly spaced landmark frames spanning `duration_secs`.
#[derive(Debug, Clone)]
pub struct RecordedVideo {
    frames: Vec<Option<PoseFrame>>,
    duration_secs: f64,
    released: bool,
}

impl RecordedVideo {
    /// Frames may be `None` where the client found no body.
    pub fn new(frames: Vec<Option<PoseFrame>>, duration_secs: f64) -> Self {
        Self {
            frames,
            duration_secs,
            released: false,
        }
    }

    pub fn from_frames(frames: Vec<PoseFrame>, duration_secs: f64) -> Self {
        Self::new(frames.into_iter().map(Some).collect(), duration_secs)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Index of the recorded frame nearest to `timestamp`.
    fn index_at(&self, timestamp: f64) -> usize {
        let last = self.frames.len().saturating_sub(1);
        if self.duration_secs <= 0.0 || last == 0 {
            return 0;
        }
        let fraction = (timestamp / self.duration_secs).clamp(0.0, 1.0);
        ((fraction * last as f64).round() as usize).min(last)
    }
}

#[async_trait]
impl FrameDecoder for RecordedVideo {
    type Frame = Option<PoseFrame>;

    fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    async fn frame_at(&mut self, timestamp: f64) -> Result<Self::Frame, CollaboratorError> {
        if self.released {
            return Err("recorded video already released".into());
        }
        if self.frames.is_empty() {
            return Err("recorded video has no frames".into());
        }
        if timestamp < 0.0 || timestamp > self.duration_secs.max(0.0) {
            return Err(format!(
                "timestamp {:.3}s outside [0, {:.3}]",
                timestamp, self.duration_secs
            )
            .into());
        }
        let index = self.index_at(timestamp);
        Ok(self.frames[index].clone())
    }

    fn release(&mut self) {
        debug!(frames = self.frames.len(), "Releasing recorded video");
        self.released = true;
        self.frames.clear();
    }
}

/// Pose estimator that passes recorded landmarks through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedPoseEstimator;

#[async_trait]
impl PoseEstimator<Option<PoseFrame>> for RecordedPoseEstimator {
    async fn estimate(
        &mut self,
        frame: &Option<PoseFrame>,
    ) -> Result<Option<PoseFrame>, CollaboratorError> {
        Ok(frame.clone())
    }
}
