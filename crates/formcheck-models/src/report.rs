//! The terminal artifact of an analysis run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::analysis::{KeyPositions, TemporalAnalysis};
use crate::metrics::FrameMetrics;

/// Structured risk report for one analyzed lift.
///
/// Built once per run and never mutated. `temporal_analysis` is `null` when
/// the active phase was degenerate; in that case `risk_flags` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Registered exercise name (e.g. "squat")
    pub exercise_type: String,
    /// Number of frames that passed visibility checks
    pub frame_count: usize,
    /// Approximate duration, e.g. "3.2s"
    pub duration: String,
    pub duration_seconds: f64,
    pub key_positions: KeyPositions,
    pub temporal_analysis: Option<TemporalAnalysis>,
    pub risk_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_frames_data: Option<Vec<FrameMetrics>>,
}

impl AnalysisReport {
    /// Format a duration the way it appears in reports.
    pub fn format_duration(seconds: f64) -> String {
        format!("{:.1}s", seconds)
    }

    /// Serialize as a single compact JSON line (no trailing newline).
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn has_risk_flags(&self) -> bool {
        !self.risk_flags.is_empty()
    }

    /// Compact plain-text digest for downstream summarizers.
    ///
    /// Key positions are listed in frame order, so the digest follows the
    /// movement rather than role names.
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} DATA ({} frames, {}):",
            self.exercise_type.to_uppercase(),
            self.frame_count,
            self.duration
        );

        out.push_str("\nKEY POSITIONS:\n");
        let mut positions: Vec<_> = self.key_positions.iter().collect();
        positions.sort_by_key(|(_, position)| position.frame);
        for (role, position) in positions {
            let values = position
                .metrics
                .fields()
                .into_iter()
                .map(|(name, value)| format!("{} {}", name, value))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{} (frame {}): {}", role, position.frame, values);
        }

        out.push_str("\nMOVEMENT PATTERNS: ");
        match &self.temporal_analysis {
            Some(temporal) => {
                let values = temporal
                    .fields()
                    .into_iter()
                    .map(|(name, value)| format!("{} {}", name, value))
                    .collect::<Vec<_>>()
                    .join(" | ");
                out.push_str(&values);
            }
            None => out.push_str("N/A"),
        }

        out.push_str("\n\nRISK FLAGS: ");
        if self.risk_flags.is_empty() {
            out.push_str("None detected");
        } else {
            out.push_str(&self.risk_flags.join(", "));
        }
        out
    }
}
