//! Conventional deadlift analysis, filmed side-on.
//!
//! The hands stand in for the bar: bar height is wrist height and bar path
//! deviation is the horizontal wrist-to-ankle (midfoot) distance.

use formcheck_models::{
    DeadliftMetrics, DeadliftTemporal, FrameMetrics, Joint, KeyPosition, KeyPositions,
    TemporalAnalysis,
};

use super::positions::{COMPLETION, LOCKOUT, SETUP, START_OF_PULL};
use super::roles::{ANKLE, EAR, HIP, KNEE, SHOULDER, WRIST};
use super::stats::{self, active_phase, index_of_max, index_of_min, max_of, mean_of, min_of};
use super::{ExerciseConfig, RequiredJoint, ResolvedJoints, RiskRule};
use crate::geometry::{angle_at, angle_from_vertical, height, round_to};

const REQUIRED_JOINTS: &[RequiredJoint] = &[
    RequiredJoint::new(SHOULDER, Joint::LeftShoulder),
    RequiredJoint::new(HIP, Joint::LeftHip),
    RequiredJoint::new(KNEE, Joint::LeftKnee).with_min_visibility(0.25),
    RequiredJoint::new(ANKLE, Joint::LeftAnkle).with_min_visibility(0.1),
    RequiredJoint::new(WRIST, Joint::LeftWrist).with_min_visibility(0.3),
    RequiredJoint::new(EAR, Joint::LeftEar),
];

const RISK_RULES: &[RiskRule] = &[
    RiskRule::new(
        "maxBackAngle",
        50.0,
        "°",
        "Excessive forward torso lean loads the lumbar spine",
    ),
    RiskRule::new(
        "backAngleChange",
        15.0,
        "°",
        "Back angle changed during the pull, a sign of spinal rounding",
    ),
    RiskRule::new(
        "riseRateRatio",
        1.3,
        "",
        "Hips shooting up before the shoulders (stiff-leg pull)",
    ),
    RiskRule::new(
        "maxBarPathDeviation",
        8.0,
        "%",
        "Bar drifting away from the body",
    ),
    RiskRule::new(
        "neckExtensionMax",
        35.0,
        "°",
        "Neck hyperextended from looking up too far",
    ),
];

/// Deadlift: the pull runs from the lowest bar position to the highest hip
/// position.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadliftConfig;

fn wrist_height(m: &FrameMetrics) -> Option<f64> {
    m.as_deadlift().map(|d| d.wrist_height)
}

impl ExerciseConfig for DeadliftConfig {
    fn name(&self) -> &'static str {
        "deadlift"
    }

    fn required_joints(&self) -> &'static [RequiredJoint] {
        REQUIRED_JOINTS
    }

    fn risk_rules(&self) -> &'static [RiskRule] {
        RISK_RULES
    }

    fn compute_metrics(&self, joints: &ResolvedJoints<'_>) -> Option<FrameMetrics> {
        let shoulder = joints.point(SHOULDER)?;
        let hip = joints.point(HIP)?;
        let knee = joints.point(KNEE)?;
        let ankle = joints.point(ANKLE)?;
        let wrist = joints.point(WRIST)?;
        let ear = joints.point(EAR)?;

        Some(FrameMetrics::Deadlift(DeadliftMetrics {
            hip_angle: round_to(angle_at(shoulder, hip, knee), 1),
            knee_angle: round_to(angle_at(hip, knee, ankle), 1),
            back_angle: round_to(angle_from_vertical(shoulder, hip), 1),
            neck_angle: round_to(180.0 - angle_at(ear, shoulder, hip), 1),
            hip_height: round_to(height(hip), 3),
            shoulder_height: round_to(height(shoulder), 3),
            wrist_height: round_to(height(wrist), 3),
            bar_path_deviation: round_to((wrist.x - ankle.x).abs() * 100.0, 1),
        }))
    }

    fn key_positions(&self, frames: &[FrameMetrics]) -> KeyPositions {
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return KeyPositions::new();
        };
        let last_index = frames.len() - 1;
        let start = index_of_min(frames, wrist_height).unwrap_or(0);
        let lockout = index_of_max(frames, |m| Some(m.hip_height())).unwrap_or(0);

        KeyPositions::new()
            .with(SETUP, KeyPosition::new(0, *first))
            .with(START_OF_PULL, KeyPosition::new(start, frames[start]))
            .with(LOCKOUT, KeyPosition::new(lockout, frames[lockout]))
            .with(COMPLETION, KeyPosition::new(last_index, *last))
    }

    fn temporal_patterns(
        &self,
        frames: &[FrameMetrics],
        key_positions: &KeyPositions,
    ) -> Option<TemporalAnalysis> {
        let start = key_positions.frame(START_OF_PULL)?;
        let lockout = key_positions.frame(LOCKOUT)?;
        let pull = active_phase(frames, start, lockout)?;

        let all: Vec<&DeadliftMetrics> =
            frames.iter().filter_map(FrameMetrics::as_deadlift).collect();
        let pull_deviation: Vec<f64> = pull
            .iter()
            .filter_map(FrameMetrics::as_deadlift)
            .map(|m| m.bar_path_deviation)
            .collect();

        let max_back = max_of(all.iter().map(|m| m.back_angle))?;
        let min_back = min_of(all.iter().map(|m| m.back_angle))?;

        let hip_rise_rate = stats::rise_rate(pull, FrameMetrics::hip_height);
        let shoulder_rise_rate = stats::rise_rate(pull, FrameMetrics::shoulder_height);

        Some(TemporalAnalysis::Deadlift(DeadliftTemporal {
            avg_bar_path_deviation: round_to(mean_of(pull_deviation.iter().copied())?, 1),
            max_bar_path_deviation: round_to(max_of(pull_deviation.iter().copied())?, 1),
            max_back_angle: round_to(max_back, 1),
            back_angle_change: round_to(max_back - min_back, 1),
            hip_rise_rate,
            shoulder_rise_rate,
            rise_rate_ratio: stats::rise_rate_ratio(hip_rise_rate, shoulder_rise_rate),
            neck_extension_max: round_to(max_of(all.iter().map(|m| m.neck_angle))?, 1),
        }))
    }
}
