// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::AnalyzerConfig;
use crate::descriptive::mean;
use adperf_core::MetricKind;

/// Direction of a metric's movement over the window.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

/// Least-squares trend of one metric against the day index.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendAnalysis {
    pub metric: MetricKind,
    pub slope: f64,
    pub direction: TrendDirection,
    /// `(last - first) / first * 100`; 0 when the first value is 0.
    pub change_percentage: f64,
    /// R-squared of the fit, within [0, 1].
    pub confidence: f64,
}

impl TrendAnalysis {
    fn flat(metric: MetricKind) -> Self {
        Self {
            metric,
            slope: 0.0,
            direction: TrendDirection::Stable,
            change_percentage: 0.0,
            confidence: 0.0,
        }
    }
}

/// Ordinary least-squares regression of metric value on day index 0..n-1.
///
/// Series shorter than `min_trend_points` report a stable, zero-confidence
/// trend rather than erroring.
pub fn linear_trend(metric: MetricKind, series: &[f64], cfg: &AnalyzerConfig) -> TrendAnalysis {
    let n = series.len();
    if n < cfg.min_trend_points {
        return TrendAnalysis::flat(metric);
    }

    let mean_t = (n - 1) as f64 / 2.0;
    let mean_y = mean(series);
    let mut cov = 0.0;
    let mut var_t = 0.0;
    let mut var_y = 0.0;
    for (t, y) in series.iter().enumerate() {
        let dt = t as f64 - mean_t;
        let dy = y - mean_y;
        cov += dt * dy;
        var_t += dt * dt;
        var_y += dy * dy;
    }

    let slope = if var_t > 0.0 { cov / var_t } else { 0.0 };
    let confidence = if var_t > 0.0 && var_y > 0.0 {
        ((cov * cov) / (var_t * var_y)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let first = series[0];
    let last = series[n - 1];
    let change_percentage = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };

    let stable_band = cfg.stable_slope_ratio * mean_y.abs();
    let direction = if slope == 0.0 || slope.abs() < stable_band {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    TrendAnalysis {
        metric,
        slope,
        direction,
        change_percentage,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::{TrendDirection, linear_trend};
    use crate::config::AnalyzerConfig;
    use adperf_core::MetricKind;

    fn cfg() -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    #[test]
    fn short_series_reports_stable_with_zero_confidence() {
        let trend = linear_trend(MetricKind::Cost, &[1.0, 2.0, 3.0], &cfg());
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.confidence, 0.0);
        assert_eq!(trend.change_percentage, 0.0);
    }

    #[test]
    fn linearly_increasing_cost_has_high_r_squared() {
        // 30-day cost series rising linearly from 100 to 400.
        let series: Vec<f64> = (0..30)
            .map(|t| 100.0 + 300.0 * t as f64 / 29.0)
            .collect();
        let trend = linear_trend(MetricKind::Cost, &series, &cfg());
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!(trend.confidence > 0.95, "r^2 was {}", trend.confidence);
        assert!((trend.change_percentage - 300.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_is_stable() {
        let series = vec![40.0; 14];
        let trend = linear_trend(MetricKind::Conversions, &series, &cfg());
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.confidence, 0.0);
    }

    #[test]
    fn all_zero_series_is_stable_not_decreasing() {
        let series = vec![0.0; 10];
        let trend = linear_trend(MetricKind::Conversions, &series, &cfg());
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.change_percentage, 0.0);
    }

    #[test]
    fn decreasing_series_reports_negative_slope_and_change() {
        let series: Vec<f64> = (0..14).map(|t| 200.0 - 10.0 * t as f64).collect();
        let trend = linear_trend(MetricKind::Conversions, &series, &cfg());
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert!(trend.slope < 0.0);
        assert!(trend.change_percentage < 0.0);
    }

    #[test]
    fn change_percentage_is_zero_when_first_value_is_zero() {
        let mut series = vec![0.0];
        series.extend((1..12).map(|t| t as f64 * 5.0));
        let trend = linear_trend(MetricKind::Cost, &series, &cfg());
        assert_eq!(trend.change_percentage, 0.0);
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    #[test]
    fn tiny_slope_within_band_is_stable() {
        // Mean ~1000, slope 0.5/day: well under the 1% stability band.
        let series: Vec<f64> = (0..30).map(|t| 1000.0 + 0.5 * t as f64).collect();
        let trend = linear_trend(MetricKind::Impressions, &series, &cfg());
        assert_eq!(trend.direction, TrendDirection::Stable);
    }
}
