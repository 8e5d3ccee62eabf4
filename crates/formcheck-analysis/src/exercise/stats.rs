//! Reductions over metrics sequences shared by the exercise configs.

use formcheck_models::FrameMetrics;

use crate::geometry::round_to;

/// Index of the smallest value; the earliest index wins ties.
/// Frames for which `key` yields `None` are skipped.
pub fn index_of_min<F>(frames: &[FrameMetrics], key: F) -> Option<usize>
where
    F: Fn(&FrameMetrics) -> Option<f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, frame) in frames.iter().enumerate() {
        if let Some(value) = key(frame) {
            match best {
                Some((_, current)) if value >= current => {}
                _ => best = Some((i, value)),
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the largest value; the earliest index wins ties.
pub fn index_of_max<F>(frames: &[FrameMetrics], key: F) -> Option<usize>
where
    F: Fn(&FrameMetrics) -> Option<f64>,
{
    index_of_min(frames, |frame| key(frame).map(|v| -v))
}

pub fn max_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

pub fn min_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().fold(None, |acc, v| match acc {
        Some(m) if m <= v => Some(m),
        _ => Some(v),
    })
}

pub fn mean_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Height change per frame across a phase, rounded to 4 decimals.
///
/// The divisor is the number of frames in the phase.
pub fn rise_rate<F>(phase: &[FrameMetrics], height: F) -> f64
where
    F: Fn(&FrameMetrics) -> f64,
{
    match (phase.first(), phase.last()) {
        (Some(first), Some(last)) => {
            round_to((height(last) - height(first)) / phase.len() as f64, 4)
        }
        _ => 0.0,
    }
}

/// Hip-to-shoulder rise ratio, rounded to 2 decimals.
///
/// Returns 0 when the shoulders did not rise at all.
pub fn rise_rate_ratio(hip_rise_rate: f64, shoulder_rise_rate: f64) -> f64 {
    if shoulder_rise_rate == 0.0 {
        return 0.0;
    }
    round_to(hip_rise_rate / shoulder_rise_rate, 2)
}

/// The inclusive frame range `[start, end]`, or `None` when `start >= end`
/// or the range falls outside the sequence.
pub fn active_phase(frames: &[FrameMetrics], start: usize, end: usize) -> Option<&[FrameMetrics]> {
    if start >= end || end >= frames.len() {
        return None;
    }
    Some(&frames[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_models::SquatMetrics;

    fn frame(hip_height: f64, shoulder_height: f64) -> FrameMetrics {
        FrameMetrics::Squat(SquatMetrics {
            hip_angle: 90.0,
            knee_angle: 90.0,
            ankle_angle: 80.0,
            torso_lean: 30.0,
            neck_angle: 10.0,
            hip_height,
            shoulder_height,
            knee_forward_travel: 5.0,
        })
    }

    #[test]
    fn test_index_of_min_first_tie() {
        let frames = vec![frame(0.5, 0.7), frame(0.3, 0.6), frame(0.3, 0.6), frame(0.5, 0.7)];
        assert_eq!(index_of_min(&frames, |f| Some(f.hip_height())), Some(1));
    }

    #[test]
    fn test_index_of_max_first_tie() {
        let frames = vec![frame(0.3, 0.6), frame(0.6, 0.8), frame(0.6, 0.8)];
        assert_eq!(index_of_max(&frames, |f| Some(f.hip_height())), Some(1));
    }

    #[test]
    fn test_index_skips_missing_values() {
        let frames = vec![frame(0.1, 0.6), frame(0.3, 0.6)];
        let idx = index_of_min(&frames, |f| (f.hip_height() > 0.2).then(|| f.hip_height()));
        assert_eq!(idx, Some(1));
        assert_eq!(index_of_min(&[], |f: &FrameMetrics| Some(f.hip_height())), None);
    }

    #[test]
    fn test_reductions() {
        assert_eq!(max_of([1.0, 4.0, 2.0]), Some(4.0));
        assert_eq!(min_of([3.0, -1.0, 2.0]), Some(-1.0));
        assert_eq!(mean_of([2.0, 4.0]), Some(3.0));
        assert_eq!(max_of(std::iter::empty()), None);
        assert_eq!(mean_of(std::iter::empty()), None);
    }

    #[test]
    fn test_rise_rate_divides_by_phase_length() {
        let phase = vec![frame(0.3, 0.5), frame(0.4, 0.6), frame(0.6, 0.7)];
        assert_eq!(rise_rate(&phase, |f| f.hip_height()), 0.1);
        assert_eq!(rise_rate(&phase, |f| f.shoulder_height()), 0.0667);
    }

    #[test]
    fn test_rise_rate_ratio_zero_denominator() {
        assert_eq!(rise_rate_ratio(0.1, 0.0), 0.0);
        assert_eq!(rise_rate_ratio(0.1, 0.0667), 1.5);
    }

    #[test]
    fn test_active_phase_bounds() {
        let frames = vec![frame(0.5, 0.7), frame(0.3, 0.6), frame(0.5, 0.7)];
        assert_eq!(active_phase(&frames, 1, 2).map(|p| p.len()), Some(2));
        assert!(active_phase(&frames, 2, 2).is_none());
        assert!(active_phase(&frames, 2, 1).is_none());
        assert!(active_phase(&frames, 0, 3).is_none());
    }
}
