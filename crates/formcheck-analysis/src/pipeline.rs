//! Analysis pipeline orchestration.
//!
//! A run moves through `SamplingFrames → ExtractingMetrics → Aggregating →
//! Done`, or ends in `Failed` from any stage. Frames are decoded and
//! pose-estimated one at a time in timestamp order; frames that fail
//! visibility checks are dropped. The decoder is released on every exit
//! path, including when the run future is dropped.

use std::fmt;
use std::time::Instant;

use formcheck_models::{AnalysisReport, FrameMetrics};
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{AnalysisError, AnalysisResult};
use crate::exercise::{self, ExerciseConfig};
use crate::extractor::extract_metrics;
use crate::progress::{frame_progress, PipelineStage, ProgressCallback, StageCallback};
use crate::sampling::{sample_timestamps, DEFAULT_SAMPLE_COUNT};
use crate::source::{FrameDecoder, PoseEstimator};
use crate::telemetry;

/// Per-run options.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Number of evenly spaced frames to sample
    pub sample_count: usize,
    /// Attach every accepted frame's metrics to the report
    pub include_frames: bool,
    /// Identifier used in logs; generated when absent
    pub run_id: Option<String>,
    progress: Option<ProgressCallback>,
    on_stage: Option<StageCallback>,
    cancel: Option<watch::Receiver<bool>>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            include_frames: false,
            run_id: None,
            progress: None,
            on_stage: None,
            cancel: None,
        }
    }
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("sample_count", &self.sample_count)
            .field("include_frames", &self.include_frames)
            .field("run_id", &self.run_id)
            .field("progress", &self.progress.is_some())
            .field("on_stage", &self.on_stage.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_frames_included(mut self, include: bool) -> Self {
        self.include_frames = include;
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Called once per processed frame with progress in (0, 1].
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn with_stage_callback(mut self, callback: StageCallback) -> Self {
        self.on_stage = Some(callback);
        self
    }

    /// Abort the run when the channel holds `true`.
    ///
    /// Checked before every frame seek and every pose estimation call.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel_rx);
        self
    }

    fn enter(&self, stage: PipelineStage) {
        debug!(stage = %stage, "Pipeline stage");
        if let Some(callback) = &self.on_stage {
            callback(stage);
        }
    }

    fn check_cancelled(&self) -> AnalysisResult<()> {
        match &self.cancel {
            Some(rx) if *rx.borrow() => Err(AnalysisError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Analyze one lift video.
///
/// Takes ownership of the decoder and releases it before returning.
/// Fails fast with [`AnalysisError::UnsupportedExercise`] before any frame
/// is decoded when `exercise` is not registered.
pub async fn analyze_video<D, P>(
    decoder: D,
    estimator: &mut P,
    exercise: &str,
    options: PipelineOptions,
) -> AnalysisResult<AnalysisReport>
where
    D: FrameDecoder,
    P: PoseEstimator<D::Frame>,
{
    let run_id = options
        .run_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = info_span!("form_analysis", run_id = %run_id, exercise = %exercise);

    async move {
        let started = Instant::now();
        let mut decoder = scopeguard::guard(decoder, |mut d| d.release());

        let result = run(&mut *decoder, estimator, exercise, &options).await;
        drop(decoder);

        let elapsed = started.elapsed().as_secs_f64();
        match &result {
            Ok(report) => {
                telemetry::record_run(&report.exercise_type, "success", elapsed);
                telemetry::record_risk_flags(&report.exercise_type, report.risk_flags.len());
                options.enter(PipelineStage::Done);
                info!(
                    frames = report.frame_count,
                    risk_flags = report.risk_flags.len(),
                    elapsed_ms = (elapsed * 1000.0) as u64,
                    "Analysis complete"
                );
            }
            Err(e) => {
                let label = exercise::lookup(exercise).map_or("unsupported", |c| c.name());
                telemetry::record_run(label, e.stage(), elapsed);
                options.enter(PipelineStage::Failed);
                match e {
                    AnalysisError::Cancelled | AnalysisError::NoValidFrames { .. } => {
                        warn!(stage = e.stage(), "Analysis failed: {}", e)
                    }
                    _ => error!(stage = e.stage(), "Analysis failed: {}", e),
                }
            }
        }
        result
    }
    .instrument(span)
    .await
}

async fn run<D, P>(
    decoder: &mut D,
    estimator: &mut P,
    exercise: &str,
    options: &PipelineOptions,
) -> AnalysisResult<AnalysisReport>
where
    D: FrameDecoder,
    P: PoseEstimator<D::Frame>,
{
    let config = resolve_exercise(exercise)?;
    if options.sample_count == 0 {
        return Err(AnalysisError::invalid_input("sample count must be at least 1"));
    }

    options.enter(PipelineStage::SamplingFrames);
    let duration = decoder.duration_secs();
    let timestamps = sample_timestamps(duration, options.sample_count);
    info!(
        duration_secs = duration,
        samples = timestamps.len(),
        "Sampling frames"
    );

    options.enter(PipelineStage::ExtractingMetrics);
    let total = timestamps.len();
    let mut accepted: Vec<FrameMetrics> = Vec::with_capacity(total);

    for (index, &timestamp) in timestamps.iter().enumerate() {
        options.check_cancelled()?;
        let image = decoder
            .frame_at(timestamp)
            .await
            .map_err(|e| AnalysisError::frame_sampling(timestamp, e))?;

        options.check_cancelled()?;
        let pose = estimator
            .estimate(&image)
            .await
            .map_err(|e| AnalysisError::pose_estimation(index, e))?;
        telemetry::record_frame_sampled(config.name());

        match pose.as_ref().and_then(|p| extract_metrics(p, config)) {
            Some(metrics) => accepted.push(metrics),
            None => {
                telemetry::record_frame_rejected(config.name());
                debug!(frame = index, timestamp, detected = pose.is_some(), "Frame dropped");
            }
        }

        if let Some(callback) = &options.progress {
            callback(frame_progress(index + 1, total));
        }
    }

    options.enter(PipelineStage::Aggregating);
    if accepted.is_empty() {
        return Err(AnalysisError::NoValidFrames { sampled: total });
    }
    debug!(accepted = accepted.len(), sampled = total, "Metrics extracted");

    Ok(build_report(config, accepted, duration, options.include_frames))
}

fn resolve_exercise(name: &str) -> AnalysisResult<&'static dyn ExerciseConfig> {
    exercise::lookup(name)
        .ok_or_else(|| AnalysisError::unsupported_exercise(name, &exercise::list_supported()))
}

/// Run key positions, temporal patterns and risk flags over a non-empty
/// metrics sequence and assemble the report.
pub fn build_report(
    config: &dyn ExerciseConfig,
    frames: Vec<FrameMetrics>,
    duration_secs: f64,
    include_frames: bool,
) -> AnalysisReport {
    let key_positions = config.key_positions(&frames);
    let temporal_analysis = config.temporal_patterns(&frames, &key_positions);
    let risk_flags = match &temporal_analysis {
        Some(temporal) => config.risk_flags(temporal, &key_positions),
        None => {
            debug!("Active phase is degenerate; skipping temporal analysis");
            Vec::new()
        }
    };

    AnalysisReport {
        exercise_type: config.name().to_string(),
        frame_count: frames.len(),
        duration: AnalysisReport::format_duration(duration_secs),
        duration_seconds: duration_secs,
        key_positions,
        temporal_analysis,
        risk_flags,
        all_frames_data: include_frames.then_some(frames),
    }
}

/// Build a report from an already-extracted metrics sequence.
pub fn analyze_metrics(
    exercise: &str,
    frames: Vec<FrameMetrics>,
    duration_secs: f64,
) -> AnalysisResult<AnalysisReport> {
    let config = resolve_exercise(exercise)?;
    if frames.is_empty() {
        return Err(AnalysisError::NoValidFrames { sampled: 0 });
    }
    Ok(build_report(config, frames, duration_secs, false))
}
