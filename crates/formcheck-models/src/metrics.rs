//! Per-frame biomechanical metrics.
//!
//! Angles are in degrees (1 decimal), heights are normalized to the frame
//! with 1.0 at the top (3 decimals), travel and deviation are percentages of
//! frame width (1 decimal).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metrics for one squat frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SquatMetrics {
    /// Shoulder-hip-knee angle
    pub hip_angle: f64,
    /// Hip-knee-ankle angle
    pub knee_angle: f64,
    /// Knee-ankle-toe angle
    pub ankle_angle: f64,
    /// Shoulder-hip line deviation from vertical
    pub torso_lean: f64,
    /// Head extension relative to the torso line
    pub neck_angle: f64,
    pub hip_height: f64,
    pub shoulder_height: f64,
    /// Horizontal knee-over-ankle distance
    pub knee_forward_travel: f64,
}

/// Metrics for one deadlift frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeadliftMetrics {
    pub hip_angle: f64,
    pub knee_angle: f64,
    /// Shoulder-hip line deviation from vertical
    pub back_angle: f64,
    pub neck_angle: f64,
    pub hip_height: f64,
    pub shoulder_height: f64,
    /// Hands stand in for the bar
    pub wrist_height: f64,
    /// Horizontal wrist-over-ankle distance
    pub bar_path_deviation: f64,
}

/// Metrics record for one accepted frame.
///
/// The shape depends on the exercise; both shapes serialize as a flat
/// object of camelCase fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FrameMetrics {
    Squat(SquatMetrics),
    Deadlift(DeadliftMetrics),
}

impl FrameMetrics {
    pub fn as_squat(&self) -> Option<&SquatMetrics> {
        match self {
            FrameMetrics::Squat(m) => Some(m),
            FrameMetrics::Deadlift(_) => None,
        }
    }

    pub fn as_deadlift(&self) -> Option<&DeadliftMetrics> {
        match self {
            FrameMetrics::Deadlift(m) => Some(m),
            FrameMetrics::Squat(_) => None,
        }
    }

    pub fn hip_height(&self) -> f64 {
        match self {
            FrameMetrics::Squat(m) => m.hip_height,
            FrameMetrics::Deadlift(m) => m.hip_height,
        }
    }

    pub fn shoulder_height(&self) -> f64 {
        match self {
            FrameMetrics::Squat(m) => m.shoulder_height,
            FrameMetrics::Deadlift(m) => m.shoulder_height,
        }
    }

    pub fn hip_angle(&self) -> f64 {
        match self {
            FrameMetrics::Squat(m) => m.hip_angle,
            FrameMetrics::Deadlift(m) => m.hip_angle,
        }
    }

    pub fn neck_angle(&self) -> f64 {
        match self {
            FrameMetrics::Squat(m) => m.neck_angle,
            FrameMetrics::Deadlift(m) => m.neck_angle,
        }
    }

    /// Named values in declaration order, using the serialized field names.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            FrameMetrics::Squat(m) => vec![
                ("hipAngle", m.hip_angle),
                ("kneeAngle", m.knee_angle),
                ("ankleAngle", m.ankle_angle),
                ("torsoLean", m.torso_lean),
                ("neckAngle", m.neck_angle),
                ("hipHeight", m.hip_height),
                ("shoulderHeight", m.shoulder_height),
                ("kneeForwardTravel", m.knee_forward_travel),
            ],
            FrameMetrics::Deadlift(m) => vec![
                ("hipAngle", m.hip_angle),
                ("kneeAngle", m.knee_angle),
                ("backAngle", m.back_angle),
                ("neckAngle", m.neck_angle),
                ("hipHeight", m.hip_height),
                ("shoulderHeight", m.shoulder_height),
                ("wristHeight", m.wrist_height),
                ("barPathDeviation", m.bar_path_deviation),
            ],
        }
    }
}

impl From<SquatMetrics> for FrameMetrics {
    fn from(m: SquatMetrics) -> Self {
        FrameMetrics::Squat(m)
    }
}

impl From<DeadliftMetrics> for FrameMetrics {
    fn from(m: DeadliftMetrics) -> Self {
        FrameMetrics::Deadlift(m)
    }
}
