//! Exercise configurations and the registry that maps names to them.
//!
//! Each supported lift is one [`ExerciseConfig`] implementation bundling:
//!
//! | Piece | Purpose |
//! |-------|---------|
//! | `required_joints` | Role → joint mapping with visibility thresholds |
//! | `compute_metrics` | One frame's joints → `FrameMetrics` |
//! | `key_positions` | Metrics sequence → named instants |
//! | `temporal_patterns` | Metrics + key positions → `TemporalAnalysis` |
//! | `risk_flags` | Temporal analysis + `risk_rules` → warnings |
//!
//! Adding a lift means adding an implementation and a registry entry; the
//! pipeline never branches on exercise names.

pub mod deadlift;
pub mod risk;
pub mod squat;
pub mod stats;

use formcheck_models::{
    FrameMetrics, Joint, JointSample, KeyPositions, Point3D, PoseFrame, TemporalAnalysis,
};

pub use deadlift::DeadliftConfig;
pub use risk::RiskRule;
pub use squat::SquatConfig;

/// Minimum visibility for a role without an explicit override.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Semantic joint roles used by exercise configs.
pub mod roles {
    pub const SHOULDER: &str = "shoulder";
    pub const HIP: &str = "hip";
    pub const KNEE: &str = "knee";
    pub const ANKLE: &str = "ankle";
    pub const FOOT: &str = "foot";
    pub const WRIST: &str = "wrist";
    pub const EAR: &str = "ear";
}

/// Key position role names.
pub mod positions {
    pub const SETUP: &str = "setup";
    pub const BOTTOM_POSITION: &str = "bottomPosition";
    pub const START_OF_PULL: &str = "startOfPull";
    pub const LOCKOUT: &str = "lockout";
    pub const COMPLETION: &str = "completion";
}

/// A joint an exercise needs in every accepted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredJoint {
    pub role: &'static str,
    pub joint: Joint,
    /// Overrides [`DEFAULT_VISIBILITY_THRESHOLD`] for occlusion-prone joints
    pub min_visibility: Option<f64>,
}

impl RequiredJoint {
    pub const fn new(role: &'static str, joint: Joint) -> Self {
        Self {
            role,
            joint,
            min_visibility: None,
        }
    }

    pub const fn with_min_visibility(mut self, threshold: f64) -> Self {
        self.min_visibility = Some(threshold);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.min_visibility.unwrap_or(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

/// Required roles resolved against one frame.
#[derive(Debug, Clone)]
pub struct ResolvedJoints<'a> {
    frame: &'a PoseFrame,
    joints: Vec<(&'static str, &'a JointSample)>,
}

impl<'a> ResolvedJoints<'a> {
    pub(crate) fn new(frame: &'a PoseFrame, joints: Vec<(&'static str, &'a JointSample)>) -> Self {
        Self { frame, joints }
    }

    /// The full joint set of the frame.
    pub fn frame(&self) -> &'a PoseFrame {
        self.frame
    }

    pub fn sample(&self, role: &str) -> Option<&'a JointSample> {
        self.joints
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, sample)| *sample)
    }

    pub fn point(&self, role: &str) -> Option<Point3D> {
        self.sample(role).map(|s| s.position)
    }
}

/// Declarative analysis bundle for one lift.
pub trait ExerciseConfig: Send + Sync {
    /// Registry name (lowercase).
    fn name(&self) -> &'static str;

    fn required_joints(&self) -> &'static [RequiredJoint];

    /// Risk checks in the order their flags are reported.
    fn risk_rules(&self) -> &'static [RiskRule];

    /// Compute one frame's metrics, rounded to reporting precision.
    ///
    /// Only called once every required role passed its visibility check.
    fn compute_metrics(&self, joints: &ResolvedJoints<'_>) -> Option<FrameMetrics>;

    /// Locate key positions in a non-empty metrics sequence.
    fn key_positions(&self, frames: &[FrameMetrics]) -> KeyPositions;

    /// Summarize the movement, or `None` when the active phase is degenerate.
    fn temporal_patterns(
        &self,
        frames: &[FrameMetrics],
        key_positions: &KeyPositions,
    ) -> Option<TemporalAnalysis>;

    /// Compare temporal statistics against this lift's risk rules.
    fn risk_flags(&self, temporal: &TemporalAnalysis, _key_positions: &KeyPositions) -> Vec<String> {
        risk::detect_risk_flags(temporal, self.risk_rules())
    }
}

static SQUAT: SquatConfig = SquatConfig;
static DEADLIFT: DeadliftConfig = DeadliftConfig;

/// Registered exercises in listing order.
static REGISTRY: [&dyn ExerciseConfig; 2] = [&SQUAT, &DEADLIFT];

/// Find an exercise by name, ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> Option<&'static dyn ExerciseConfig> {
    let name = name.trim();
    REGISTRY
        .iter()
        .copied()
        .find(|config| config.name().eq_ignore_ascii_case(name))
}

/// Names of all registered exercises.
pub fn list_supported() -> Vec<&'static str> {
    REGISTRY.iter().map(|config| config.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("squat").map(|c| c.name()), Some("squat"));
        assert_eq!(lookup("Squat").map(|c| c.name()), Some("squat"));
        assert_eq!(lookup(" DEADLIFT ").map(|c| c.name()), Some("deadlift"));
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("bench-press").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_list_supported_order() {
        assert_eq!(list_supported(), vec!["squat", "deadlift"]);
    }

    #[test]
    fn test_required_joint_threshold_default() {
        let joint = RequiredJoint::new(roles::HIP, Joint::LeftHip);
        assert_eq!(joint.threshold(), DEFAULT_VISIBILITY_THRESHOLD);
        assert_eq!(joint.with_min_visibility(0.1).threshold(), 0.1);
    }

    #[test]
    fn test_registered_configs_have_distinct_roles() {
        for config in REGISTRY.iter() {
            let joints = config.required_joints();
            for (i, a) in joints.iter().enumerate() {
                assert!(
                    joints[i + 1..].iter().all(|b| b.role != a.role),
                    "{} repeats role {}",
                    config.name(),
                    a.role
                );
            }
        }
    }
}
