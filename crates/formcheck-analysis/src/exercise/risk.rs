//! Threshold-based risk flag detection.

use formcheck_models::TemporalAnalysis;
use tracing::debug;

/// One risk check: flags when the named statistic is strictly greater than
/// `limit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskRule {
    /// Serialized name of the `TemporalAnalysis` statistic
    pub metric: &'static str,
    pub limit: f64,
    /// Appended to both the measured value and the limit ("°", "%", "")
    pub unit: &'static str,
    pub message: &'static str,
}

impl RiskRule {
    pub const fn new(
        metric: &'static str,
        limit: f64,
        unit: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            metric,
            limit,
            unit,
            message,
        }
    }

    /// Flag text embedding the measured value and the limit.
    pub fn format_flag(&self, value: f64) -> String {
        format!(
            "{} ({}{} - threshold: {}{})",
            self.message, value, self.unit, self.limit, self.unit
        )
    }
}

/// Run every rule in order; each rule fires independently.
///
/// Rules naming a statistic the analysis does not carry are skipped.
pub fn detect_risk_flags(temporal: &TemporalAnalysis, rules: &[RiskRule]) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = temporal.value(rule.metric)?;
            if value > rule.limit {
                debug!(metric = rule.metric, value, limit = rule.limit, "Risk threshold exceeded");
                Some(rule.format_flag(value))
            } else {
                None
            }
        })
        .collect()
}
