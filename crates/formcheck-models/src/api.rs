//! HTTP request and response bodies for the form analysis API.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pose::PoseFrame;
use crate::report::AnalysisReport;

/// Analyze a lift from landmarks extracted on the client.
///
/// Frames must be in temporal order and evenly spaced over `duration_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysisRequest {
    #[validate(length(min = 1, max = 64))]
    pub exercise_type: String,

    #[validate(range(min = 0.0))]
    pub duration_seconds: f64,

    #[validate(length(min = 1, max = 600))]
    pub frames: Vec<PoseFrame>,

    /// Number of frames to sample; defaults to every provided frame
    #[serde(default)]
    #[validate(range(min = 1))]
    pub sample_count: Option<u32>,

    /// Attach every accepted frame's metrics to the report
    #[serde(default)]
    pub include_frames: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysisResponse {
    pub report: AnalysisReport,
    pub timestamp: DateTime<Utc>,
    pub exercise_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExercisesResponse {
    pub exercises: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(frames: usize) -> FormAnalysisRequest {
        FormAnalysisRequest {
            exercise_type: "squat".to_string(),
            duration_seconds: 2.0,
            frames: vec![PoseFrame::empty(); frames],
            sample_count: None,
            include_frames: false,
        }
    }

    #[test]
    fn test_request_requires_frames() {
        assert!(request(0).validate().is_err());
        assert!(request(3).validate().is_ok());
    }

    #[test]
    fn test_request_rejects_negative_duration() {
        let mut req = request(2);
        req.duration_seconds = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_rejects_zero_sample_count() {
        let mut req = request(2);
        req.sample_count = Some(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let frame = vec!["null"; 33].join(",");
        let json = format!(
            r#"{{"exerciseType":"Squat","durationSeconds":1.5,"frames":[[{}]],"includeFrames":true}}"#,
            frame
        );
        let req: FormAnalysisRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.exercise_type, "Squat");
        assert_eq!(req.frames.len(), 1);
        assert!(req.include_frames);
        assert_eq!(req.sample_count, None);
    }
}
