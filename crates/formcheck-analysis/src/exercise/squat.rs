//! Back squat analysis, filmed side-on (left side toward the camera).

use formcheck_models::{
    FrameMetrics, Joint, KeyPosition, KeyPositions, SquatMetrics, SquatTemporal, TemporalAnalysis,
};

use super::positions::{BOTTOM_POSITION, COMPLETION, SETUP};
use super::roles::{ANKLE, EAR, FOOT, HIP, KNEE, SHOULDER};
use super::stats::{self, active_phase, index_of_min, max_of, min_of};
use super::{ExerciseConfig, RequiredJoint, ResolvedJoints, RiskRule};
use crate::geometry::{angle_at, angle_from_vertical, height, round_to};

const REQUIRED_JOINTS: &[RequiredJoint] = &[
    RequiredJoint::new(SHOULDER, Joint::LeftShoulder),
    RequiredJoint::new(HIP, Joint::LeftHip),
    RequiredJoint::new(KNEE, Joint::LeftKnee).with_min_visibility(0.25),
    RequiredJoint::new(ANKLE, Joint::LeftAnkle).with_min_visibility(0.1),
    RequiredJoint::new(FOOT, Joint::LeftFootIndex).with_min_visibility(0.1),
    RequiredJoint::new(EAR, Joint::LeftEar),
];

const RISK_RULES: &[RiskRule] = &[
    RiskRule::new(
        "maxTorsoLean",
        45.0,
        "°",
        "Excessive forward torso lean puts shear load on the lower back",
    ),
    RiskRule::new(
        "riseRateRatio",
        1.2,
        "",
        "Hips rising faster than shoulders out of the hole (good-morning squat)",
    ),
    RiskRule::new(
        "neckExtensionMax",
        30.0,
        "°",
        "Neck hyperextended from looking up too far",
    ),
    RiskRule::new(
        "minHipAngle",
        100.0,
        "°",
        "Shallow squat: hips never reached parallel",
    ),
    RiskRule::new(
        "maxKneeForwardTravel",
        15.0,
        "%",
        "Excessive forward knee drift over the toes",
    ),
];

/// Squat: bottom is the lowest hip position, the ascent runs from there to
/// the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquatConfig;

impl ExerciseConfig for SquatConfig {
    fn name(&self) -> &'static str {
        "squat"
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
        let foot = joints.point(FOOT)?;
        let ear = joints.point(EAR)?;

        Some(FrameMetrics::Squat(SquatMetrics {
            hip_angle: round_to(angle_at(shoulder, hip, knee), 1),
            knee_angle: round_to(angle_at(hip, knee, ankle), 1),
            ankle_angle: round_to(angle_at(knee, ankle, foot), 1),
            torso_lean: round_to(angle_from_vertical(shoulder, hip), 1),
            neck_angle: round_to(180.0 - angle_at(ear, shoulder, hip), 1),
            hip_height: round_to(height(hip), 3),
            shoulder_height: round_to(height(shoulder), 3),
            knee_forward_travel: round_to((knee.x - ankle.x).abs() * 100.0, 1),
        }))
    }

    fn key_positions(&self, frames: &[FrameMetrics]) -> KeyPositions {
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return KeyPositions::new();
        };
        let last_index = frames.len() - 1;
        let bottom = index_of_min(frames, |m| Some(m.hip_height())).unwrap_or(0);

        KeyPositions::new()
            .with(SETUP, KeyPosition::new(0, *first))
            .with(BOTTOM_POSITION, KeyPosition::new(bottom, frames[bottom]))
            .with(COMPLETION, KeyPosition::new(last_index, *last))
    }

    fn temporal_patterns(
        &self,
        frames: &[FrameMetrics],
        key_positions: &KeyPositions,
    ) -> Option<TemporalAnalysis> {
        let bottom = key_positions.frame(BOTTOM_POSITION)?;
        let completion = key_positions.frame(COMPLETION)?;
        let ascent = active_phase(frames, bottom, completion)?;

        let squats: Vec<&SquatMetrics> = frames.iter().filter_map(FrameMetrics::as_squat).collect();

        let hip_rise_rate = stats::rise_rate(ascent, FrameMetrics::hip_height);
        let shoulder_rise_rate = stats::rise_rate(ascent, FrameMetrics::shoulder_height);

        Some(TemporalAnalysis::Squat(SquatTemporal {
            hip_rise_rate,
            shoulder_rise_rate,
            rise_rate_ratio: stats::rise_rate_ratio(hip_rise_rate, shoulder_rise_rate),
            max_torso_lean: round_to(max_of(squats.iter().map(|m| m.torso_lean))?, 1),
            max_knee_forward_travel: round_to(
                max_of(squats.iter().map(|m| m.knee_forward_travel))?,
                1,
            ),
            neck_extension_max: round_to(max_of(squats.iter().map(|m| m.neck_angle))?, 1),
            min_hip_angle: round_to(min_of(squats.iter().map(|m| m.hip_angle))?, 1),
        }))
    }
}
