//! Form analysis handlers.
//!
//! Pose estimation runs on the client; requests carry one landmark frame per
//! captured video frame, evenly spaced over the clip. The frames are replayed
//! through the analysis pipeline as a recorded video.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use formcheck_analysis::{
    analyze_video, list_supported, PipelineOptions, RecordedPoseEstimator, RecordedVideo,
};
use formcheck_models::{ExercisesResponse, FormAnalysisRequest, FormAnalysisResponse};

use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestId;
use crate::state::AppState;

/// List the exercises the analyzer supports.
pub async fn list_exercises() -> Json<ExercisesResponse> {
    Json(ExercisesResponse {
        exercises: list_supported().into_iter().map(str::to_string).collect(),
    })
}

/// Analyze a lift from client-extracted landmarks.
pub async fn analyze_form(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<FormAnalysisRequest>, JsonRejection>,
) -> ApiResult<Json<FormAnalysisResponse>> {
    let Json(request) = payload?;
    check_request(&request, state.config.max_frames)?;

    let frame_count = request.frames.len();
    let sample_count = request
        .sample_count
        .map_or(frame_count, |n| n as usize);

    let mut options = PipelineOptions::new()
        .with_sample_count(sample_count)
        .with_frames_included(request.include_frames);
    if let Some(Extension(RequestId(id))) = request_id {
        options = options.with_run_id(id);
    }

    info!(
        exercise = %request.exercise_type,
        frames = frame_count,
        samples = sample_count,
        "Form analysis requested"
    );

    let video = RecordedVideo::from_frames(request.frames, request.duration_seconds);
    let report = analyze_video(
        video,
        &mut RecordedPoseEstimator,
        &request.exercise_type,
        options,
    )
    .await?;

    Ok(Json(FormAnalysisResponse {
        exercise_type: report.exercise_type.clone(),
        report,
        timestamp: Utc::now(),
    }))
}

fn check_request(request: &FormAnalysisRequest, max_frames: usize) -> ApiResult<()> {
    request
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    if request.frames.len() > max_frames {
        return Err(ApiError::validation(format!(
            "frames: at most {} frames per request, got {}",
            max_frames,
            request.frames.len()
        )));
    }
    if let Some(samples) = request.sample_count {
        if samples as usize > request.frames.len() {
            return Err(ApiError::validation(format!(
                "sampleCount: cannot exceed the {} frames sent, got {}",
                request.frames.len(),
                samples
            )));
        }
    }
    if request.frames.len() > 1 && request.duration_seconds <= 0.0 {
        return Err(ApiError::validation(
            "durationSeconds: must be positive when more than one frame is sent",
        ));
    }
    Ok(())
}
