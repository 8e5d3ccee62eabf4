//! Analysis metrics recorded through the `metrics` facade.
//!
//! Nothing is exported unless the host installs a recorder.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_SAMPLED_TOTAL: &str = "formcheck_frames_sampled_total";
    pub const FRAMES_REJECTED_TOTAL: &str = "formcheck_frames_rejected_total";
    pub const RUNS_TOTAL: &str = "formcheck_runs_total";
    pub const RISK_FLAGS_TOTAL: &str = "formcheck_risk_flags_total";
    pub const RUN_DURATION_SECONDS: &str = "formcheck_run_duration_seconds";
}

/// Record one frame handed to the pose estimator.
pub fn record_frame_sampled(exercise: &str) {
    let labels = [("exercise", exercise.to_string())];
    counter!(names::FRAMES_SAMPLED_TOTAL, &labels).increment(1);
}

/// Record a frame dropped by visibility gating or pose detection.
pub fn record_frame_rejected(exercise: &str) {
    let labels = [("exercise", exercise.to_string())];
    counter!(names::FRAMES_REJECTED_TOTAL, &labels).increment(1);
}

/// Record the outcome of a run (`"success"` or the failing stage).
pub fn record_run(exercise: &str, outcome: &str, duration_secs: f64) {
    let labels = [
        ("exercise", exercise.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::RUNS_TOTAL, &labels).increment(1);
    histogram!(names::RUN_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_risk_flags(exercise: &str, count: usize) {
    let labels = [("exercise", exercise.to_string())];
    counter!(names::RISK_FLAGS_TOTAL, &labels).increment(count as u64);
}
