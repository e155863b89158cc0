//! Summary statistics over per-trial timings.
//!
//! Every function here is total: an empty slice yields `0.0` rather than an
//! error or `NaN`, so report code never has to special-case a result whose
//! trials have not been recorded yet.

/// Pixels per megapixel.
const MEGAPIXEL: f64 = 1_000_000.0;

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Median: the middle value for odd counts, the midpoint of the two central
/// values for even counts.
pub fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Bessel-corrected sample standard deviation (n - 1 divisor).
///
/// Defined as zero for fewer than two samples.
pub fn sample_std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let avg = mean(samples);
    let sum_sq: f64 = samples.iter().map(|t| (t - avg) * (t - avg)).sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// Smallest sample.
pub fn min(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest sample.
pub fn max(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Megapixels per second for a square image of side `image_size` processed
/// in `average_secs`. Zero when the average is not positive.
pub fn throughput_mpps(image_size: u32, average_secs: f64) -> f64 {
    if average_secs <= 0.0 {
        return 0.0;
    }
    let pixels = image_size as f64 * image_size as f64;
    (pixels / MEGAPIXEL) / average_secs
}

/// All derived metrics for one timing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Arithmetic mean (seconds).
    pub average: f64,
    /// Median (seconds).
    pub median: f64,
    /// Sample standard deviation (seconds).
    pub std_dev: f64,
    /// Fastest trial (seconds).
    pub min: f64,
    /// Slowest trial (seconds).
    pub max: f64,
    /// Megapixels per second at the average time.
    pub throughput: f64,
}

impl Summary {
    /// Compute every metric for `timings` of a `image_size`² image.
    pub fn from_timings(image_size: u32, timings: &[f64]) -> Self {
        let average = mean(timings);
        Self {
            average,
            median: median(timings),
            std_dev: sample_std_dev(timings),
            min: min(timings),
            max: max(timings),
            throughput: throughput_mpps(image_size, average),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_sequence() {
        let t = [0.010, 0.020, 0.030];
        assert_abs_diff_eq!(mean(&t), 0.020, epsilon = 1e-12);
        assert_abs_diff_eq!(median(&t), 0.020, epsilon = 1e-12);
        assert_abs_diff_eq!(sample_std_dev(&t), 0.010, epsilon = 1e-12);
        assert_abs_diff_eq!(min(&t), 0.010);
        assert_abs_diff_eq!(max(&t), 0.030);
    }

    #[test]
    fn test_empty_is_all_zero() {
        let s = Summary::from_timings(512, &[]);
        assert_eq!(s, Summary::default());
    }

    #[test]
    fn test_median_even_count_uses_midpoint() {
        assert_abs_diff_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_single_sample_std_dev_is_zero() {
        assert_eq!(sample_std_dev(&[0.5]), 0.0);
    }

    #[test]
    fn test_throughput() {
        assert_abs_diff_eq!(throughput_mpps(512, 0.1), 2.62144, epsilon = 1e-6);
        assert_eq!(throughput_mpps(512, 0.0), 0.0);
    }
}
