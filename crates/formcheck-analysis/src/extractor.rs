//! Per-frame metrics extraction gated by joint visibility.

use std::fmt;

use formcheck_models::{FrameMetrics, Joint, PoseFrame};
use tracing::debug;

use crate::exercise::{ExerciseConfig, RequiredJoint, ResolvedJoints};

/// Why a required joint was not usable in a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityIssue {
    pub role: &'static str,
    pub joint: Joint,
    /// `None` when the estimator did not report the joint at all
    pub visibility: Option<f64>,
    pub threshold: f64,
}

impl fmt::Display for VisibilityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.visibility {
            Some(v) => write!(
                f,
                "{} ({}) visibility {:.2} below {:.2}",
                self.role, self.joint, v, self.threshold
            ),
            None => write!(f, "{} ({}) not detected", self.role, self.joint),
        }
    }
}

/// Resolve every required role against a frame.
///
/// This is the single pass/fail check: the frame is usable iff no issue is
/// reported. A visibility of NaN counts as below threshold.
pub fn resolve_joints<'a>(
    frame: &'a PoseFrame,
    required: &'static [RequiredJoint],
) -> Result<ResolvedJoints<'a>, Vec<VisibilityIssue>> {
    let mut resolved = Vec::with_capacity(required.len());
    let mut issues = Vec::new();

    for req in required {
        let threshold = req.threshold();
        match frame.get(req.joint) {
            Some(sample) if sample.visibility >= threshold => resolved.push((req.role, sample)),
            Some(sample) => issues.push(VisibilityIssue {
                role: req.role,
                joint: req.joint,
                visibility: Some(sample.visibility),
                threshold,
            }),
            None => issues.push(VisibilityIssue {
                role: req.role,
                joint: req.joint,
                visibility: None,
                threshold,
            }),
        }
    }

    if issues.is_empty() {
        Ok(ResolvedJoints::new(frame, resolved))
    } else {
        Err(issues)
    }
}

/// Compute a frame's metrics, or `None` if any required joint fails its
/// visibility check. There is no partial output.
pub fn extract_metrics(frame: &PoseFrame, config: &dyn ExerciseConfig) -> Option<FrameMetrics> {
    match resolve_joints(frame, config.required_joints()) {
        Ok(joints) => config.compute_metrics(&joints),
        Err(issues) => {
            let summary = issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            debug!(
                exercise = config.name(),
                failed_roles = issues.len(),
                "Frame rejected: {}",
                summary
            );
            None
        }
    }
}
