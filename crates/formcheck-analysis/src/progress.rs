//! Progress reporting for analysis runs.
//!
//! Callers can observe two things without coupling to a transport:
//! per-frame fractional progress and pipeline stage transitions.

use std::fmt;
use std::sync::Arc;

/// Stage of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Computing timestamps and preparing the decoder
    SamplingFrames,
    /// Decoding frames, estimating poses and computing metrics
    ExtractingMetrics,
    /// Key positions, temporal patterns and risk flags
    Aggregating,
    /// Report produced
    Done,
    /// Run ended with an error
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::SamplingFrames => "sampling_frames",
            PipelineStage::ExtractingMetrics => "extracting_metrics",
            PipelineStage::Aggregating => "aggregating",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Called once per processed frame with progress in (0, 1].
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Called on every stage transition.
pub type StageCallback = Arc<dyn Fn(PipelineStage) + Send + Sync>;

/// Fraction of work done after `processed` of `total` frames.
pub fn frame_progress(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (processed as f64 / total as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_progress() {
        assert!((frame_progress(1, 8) - 0.125).abs() < 1e-12);
        assert_eq!(frame_progress(8, 8), 1.0);
        assert_eq!(frame_progress(0, 0), 1.0);
    }

    #[test]
    fn test_terminal_stages() {
        assert!(PipelineStage::Done.is_terminal());
        assert!(PipelineStage::Failed.is_terminal());
        assert!(!PipelineStage::Aggregating.is_terminal());
        assert_eq!(PipelineStage::SamplingFrames.to_string(), "sampling_frames");
    }
}
