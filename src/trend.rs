//! Cycle-length trend: least squares blended with a weighted average.

use crate::stats::CycleStatistics;

/// Fewer samples than this give no usable trend.
pub const MIN_TREND_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Projected next cycle length and the per-cycle drift behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendProjection {
    pub length: f64,
    pub slope: f64,
}

/// Ordinary least squares. A degenerate denominator falls back to a flat
/// line through the mean of `y`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> LinearFit {
    let n = x.len().min(y.len());
    if n == 0 {
        return LinearFit {
            slope: 0.0,
            intercept: 0.0,
        };
    }
    let (x, y) = (&x[..n], &y[..n]);
    let nf = n as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(xi, yi)| xi * yi).sum();
    let sum_x2: f64 = x.iter().map(|xi| xi * xi).sum();

    let denominator = nf * sum_x2 - sum_x * sum_x;
    let slope = if denominator != 0.0 {
        (nf * sum_xy - sum_x * sum_y) / denominator
    } else {
        0.0
    };

    LinearFit {
        slope,
        intercept: (sum_y - slope * sum_x) / nf,
    }
}

/// Project the next cycle length from recent lengths (oldest first).
///
/// With at least [`MIN_TREND_SAMPLES`] values the regression estimate for the
/// next index is blended with the recency-weighted average,
/// `weight * regression + (1 - weight) * weighted_average`. Shorter histories
/// return the weighted average with a zero slope.
pub fn predict_with_trend(lengths: &[i64], regression_weight: f64) -> Option<TrendProjection> {
    let stats = CycleStatistics::from_lengths(lengths)?;

    if lengths.len() < MIN_TREND_SAMPLES {
        return Some(TrendProjection {
            length: stats.weighted_average,
            slope: 0.0,
        });
    }

    let x: Vec<f64> = (1..=lengths.len()).map(|i| i as f64).collect();
    let y: Vec<f64> = lengths.iter().map(|&len| len as f64).collect();
    let fit = linear_regression(&x, &y);
    let projected = fit.at((lengths.len() + 1) as f64);

    Some(TrendProjection {
        length: regression_weight * projected + (1.0 - regression_weight) * stats.weighted_average,
        slope: fit.slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REGRESSION_WEIGHT;

    #[test]
    fn short_history_uses_weighted_average() {
        let projection = predict_with_trend(&[26, 32], REGRESSION_WEIGHT).unwrap();
        assert_eq!(projection.slope, 0.0);
        // (26 + 64) / 3
        assert_eq!(projection.length, 30.0);
    }

    #[test]
    fn single_sample_projects_itself() {
        let projection = predict_with_trend(&[31], REGRESSION_WEIGHT).unwrap();
        assert_eq!(projection.slope, 0.0);
        assert_eq!(projection.length, 31.0);
    }

    #[test]
    fn empty_history_has_no_projection() {
        assert!(predict_with_trend(&[], REGRESSION_WEIGHT).is_none());
    }

    #[test]
    fn lengthening_cycles_extrapolate() {
        let projection = predict_with_trend(&[26, 28, 30], REGRESSION_WEIGHT).unwrap();
        assert!((projection.slope - 2.0).abs() < 1e-9);
        // regression: 32, weighted: (26 + 56 + 90) / 6 = 28.666..
        let expected = 0.7 * 32.0 + 0.3 * (172.0 / 6.0);
        assert!((projection.length - expected).abs() < 1e-9);
    }

    #[test]
    fn flat_history_has_zero_slope() {
        let projection = predict_with_trend(&[28; 5], REGRESSION_WEIGHT).unwrap();
        assert_eq!(projection.slope, 0.0);
        assert!((projection.length - 28.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_x_falls_back_to_mean() {
        let fit = linear_regression(&[2.0, 2.0, 2.0], &[27.0, 29.0, 31.0]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 29.0);
    }

    #[test]
    fn pure_regression_weight() {
        let projection = predict_with_trend(&[30, 29, 28, 27], 1.0).unwrap();
        assert!((projection.slope + 1.0).abs() < 1e-9);
        assert!((projection.length - 26.0).abs() < 1e-9);
    }
}
