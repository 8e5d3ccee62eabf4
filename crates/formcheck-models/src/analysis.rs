//! Movement-level analysis results: key positions and temporal patterns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::FrameMetrics;

/// A notable instant in the movement with a copy of that frame's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyPosition {
    /// Index into the accepted-frame sequence
    pub frame: usize,
    #[serde(flatten)]
    pub metrics: FrameMetrics,
}

impl KeyPosition {
    pub fn new(frame: usize, metrics: FrameMetrics) -> Self {
        Self { frame, metrics }
    }
}

/// Key positions keyed by role name (`setup`, `bottomPosition`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct KeyPositions(BTreeMap<String, KeyPosition>);

impl KeyPositions {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, role: impl Into<String>, position: KeyPosition) -> Self {
        self.0.insert(role.into(), position);
        self
    }

    pub fn get(&self, role: &str) -> Option<&KeyPosition> {
        self.0.get(role)
    }

    /// Frame index of a role, if present.
    pub fn frame(&self, role: &str) -> Option<usize> {
        self.0.get(role).map(|p| p.frame)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyPosition)> {
        self.0.iter().map(|(role, pos)| (role.as_str(), pos))
    }
}

/// Squat movement summary. Rise rates cover the ascent only; the rest
/// cover the whole set of accepted frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SquatTemporal {
    pub hip_rise_rate: f64,
    pub shoulder_rise_rate: f64,
    /// 0 when the shoulders did not rise
    pub rise_rate_ratio: f64,
    pub max_torso_lean: f64,
    pub max_knee_forward_travel: f64,
    pub neck_extension_max: f64,
    pub min_hip_angle: f64,
}

/// Deadlift movement summary. Bar path and rise rates cover the pull only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeadliftTemporal {
    pub avg_bar_path_deviation: f64,
    pub max_bar_path_deviation: f64,
    pub max_back_angle: f64,
    pub back_angle_change: f64,
    pub hip_rise_rate: f64,
    pub shoulder_rise_rate: f64,
    pub rise_rate_ratio: f64,
    pub neck_extension_max: f64,
}

/// Aggregate statistics over the active phase of a lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TemporalAnalysis {
    Squat(SquatTemporal),
    Deadlift(DeadliftTemporal),
}

impl TemporalAnalysis {
    /// Named values in declaration order, using the serialized field names.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            TemporalAnalysis::Squat(t) => vec![
                ("hipRiseRate", t.hip_rise_rate),
                ("shoulderRiseRate", t.shoulder_rise_rate),
                ("riseRateRatio", t.rise_rate_ratio),
                ("maxTorsoLean", t.max_torso_lean),
                ("maxKneeForwardTravel", t.max_knee_forward_travel),
                ("neckExtensionMax", t.neck_extension_max),
                ("minHipAngle", t.min_hip_angle),
            ],
            TemporalAnalysis::Deadlift(t) => vec![
                ("avgBarPathDeviation", t.avg_bar_path_deviation),
                ("maxBarPathDeviation", t.max_bar_path_deviation),
                ("maxBackAngle", t.max_back_angle),
                ("backAngleChange", t.back_angle_change),
                ("hipRiseRate", t.hip_rise_rate),
                ("shoulderRiseRate", t.shoulder_rise_rate),
                ("riseRateRatio", t.rise_rate_ratio),
                ("neckExtensionMax", t.neck_extension_max),
            ],
        }
    }

    /// Look up one statistic by its serialized name.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

impl From<SquatTemporal> for TemporalAnalysis {
    fn from(t: SquatTemporal) -> Self {
        TemporalAnalysis::Squat(t)
    }
}

impl From<DeadliftTemporal> for TemporalAnalysis {
    fn from(t: DeadliftTemporal) -> Self {
        TemporalAnalysis::Deadlift(t)
    }
}
