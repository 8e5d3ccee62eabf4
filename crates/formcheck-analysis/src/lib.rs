#![deny(unreachable_patterns)]
//! Biomechanical risk analysis for squat and deadlift videos.
//!
//! This crate provides:
//! - Joint angle geometry over normalized 3D landmarks
//! - A static registry of exercise configurations
//! - Visibility-gated per-frame metrics extraction
//! - Key position, temporal pattern and risk flag analysis
//! - An async pipeline driving a frame decoder and pose estimator
//!   with progress reporting and cancellation support

pub mod error;
pub mod exercise;
pub mod extractor;
pub mod geometry;
pub mod pipeline;
pub mod progress;
pub mod recorded;
pub mod sampling;
pub mod source;
pub mod telemetry;

pub use error::{AnalysisError, AnalysisResult, CollaboratorError, NO_VALID_FRAMES_GUIDANCE};
pub use exercise::{list_supported, lookup, ExerciseConfig, RequiredJoint, RiskRule};
pub use extractor::{extract_metrics, resolve_joints, VisibilityIssue};
pub use pipeline::{analyze_metrics, analyze_video, build_report, PipelineOptions};
pub use progress::{PipelineStage, ProgressCallback, StageCallback};
pub use recorded::{RecordedPoseEstimator, RecordedVideo};
pub use sampling::{sample_timestamps, DEFAULT_SAMPLE_COUNT};
pub use source::{FrameDecoder, PoseEstimator};
