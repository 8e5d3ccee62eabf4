//! Error types for analysis runs.

use thiserror::Error;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error raised by an external collaborator (frame decoder, pose estimator).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Guidance shown when no frame had the required joints in view.
pub const NO_VALID_FRAMES_GUIDANCE: &str = "Film from the side with your whole body \
(shoulders to feet) in frame, good lighting, and the camera at hip height.";

/// Errors that end an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Unsupported exercise '{requested}'. Supported exercises: {}", .supported.join(", "))]
    UnsupportedExercise {
        requested: String,
        supported: Vec<String>,
    },

    #[error(
        "No valid frames: none of the {sampled} sampled frames showed the required joints clearly. {}",
        NO_VALID_FRAMES_GUIDANCE
    )]
    NoValidFrames { sampled: usize },

    #[error("Frame sampling failed at {timestamp:.2}s: {source}")]
    FrameSampling {
        timestamp: f64,
        #[source]
        source: CollaboratorError,
    },

    #[error("Pose estimation failed on frame {frame}: {source}")]
    PoseEstimation {
        frame: usize,
        #[source]
        source: CollaboratorError,
    },

    #[error("Analysis cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AnalysisError {
    /// Create an unsupported exercise error listing the registered names.
    pub fn unsupported_exercise(requested: impl Into<String>, supported: &[&str]) -> Self {
        Self::UnsupportedExercise {
            requested: requested.into(),
            supported: supported.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Wrap a decoder failure with the timestamp being sampled.
    pub fn frame_sampling(timestamp: f64, source: impl Into<CollaboratorError>) -> Self {
        Self::FrameSampling {
            timestamp,
            source: source.into(),
        }
    }

    /// Wrap a pose estimator failure with the frame being processed.
    pub fn pose_estimation(frame: usize, source: impl Into<CollaboratorError>) -> Self {
        Self::PoseEstimation {
            frame,
            source: source.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Pipeline stage that produced this error, for logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::UnsupportedExercise { .. } | Self::InvalidInput(_) => "configuration",
            Self::FrameSampling { .. } => "frame_sampling",
            Self::PoseEstimation { .. } => "pose_estimation",
            Self::NoValidFrames { .. } => "metrics_extraction",
            Self::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_exercise_lists_names() {
        let err = AnalysisError::unsupported_exercise("bench-press", &["squat", "deadlift"]);
        let msg = err.to_string();
        assert!(msg.contains("bench-press"));
        assert!(msg.contains("squat, deadlift"));
    }

    #[test]
    fn test_no_valid_frames_is_actionable() {
        let msg = AnalysisError::NoValidFrames { sampled: 8 }.to_string();
        assert!(msg.contains("8 sampled frames"));
        assert!(msg.contains("Film from the side"));
    }

    #[test]
    fn test_collaborator_errors_keep_context() {
        let err = AnalysisError::frame_sampling(1.5, "seek past end");
        assert_eq!(err.stage(), "frame_sampling");
        assert!(err.to_string().contains("1.50s"));
        assert!(err.to_string().contains("seek past end"));
    }
}
