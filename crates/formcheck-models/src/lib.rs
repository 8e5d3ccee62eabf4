//! Shared data models for FormCheck.
//!
//! This crate provides Serde-serializable types for:
//! - Pose landmarks (33-joint scheme) as produced by a pose estimator
//! - Per-frame biomechanical metrics for each supported lift
//! - Key positions and temporal movement summaries
//! - The analysis report and HTTP request/response bodies

pub mod analysis;
pub mod api;
pub mod metrics;
pub mod pose;
pub mod report;

// Re-export common types
pub use analysis::{DeadliftTemporal, KeyPosition, KeyPositions, SquatTemporal, TemporalAnalysis};
pub use api::{ExercisesResponse, FormAnalysisRequest, FormAnalysisResponse};
pub use metrics::{DeadliftMetrics, FrameMetrics, SquatMetrics};
pub use pose::{Joint, JointSample, Point3D, PoseFrame, PoseFrameLengthError, JOINT_COUNT};
pub use report::AnalysisReport;
