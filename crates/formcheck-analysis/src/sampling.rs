//! Frame sampling schedule.

/// Default number of frames sampled per video.
pub const DEFAULT_SAMPLE_COUNT: usize = 8;

/// Evenly spaced timestamps covering `[0, duration]`.
///
/// The first sample is at 0 and the last at `duration`. A single sample is
/// taken at 0.
pub fn sample_timestamps(duration_secs: f64, count: usize) -> Vec<f64> {
    let duration = if duration_secs.is_finite() {
        duration_secs.max(0.0)
    } else {
        0.0
    };

    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n)
            .map(|i| duration * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_full_duration() {
        let ts = sample_timestamps(7.0, 8);
        assert_eq!(ts.len(), 8);
        assert_eq!(ts[0], 0.0);
        assert_eq!(ts[7], 7.0);
        assert!((ts[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(sample_timestamps(5.0, 1), vec![0.0]);
        assert!(sample_timestamps(5.0, 0).is_empty());
    }

    #[test]
    fn test_degenerate_duration_clamps_to_zero() {
        assert_eq!(sample_timestamps(-3.0, 3), vec![0.0, 0.0, 0.0]);
        assert_eq!(sample_timestamps(f64::NAN, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_monotonic() {
        let ts = sample_timestamps(3.3, 20);
        assert!(ts.windows(2).all(|w| w[0] <= w[1]));
    }
}
