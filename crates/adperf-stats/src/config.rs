// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use adperf_core::AdperfError;

const DEFAULT_MIN_DAYS_FOR_SUFFICIENCY: usize = 30;
const DEFAULT_MIN_COMPLETENESS: f64 = 0.7;
const DEFAULT_MIN_TREND_POINTS: usize = 7;
const DEFAULT_STABLE_SLOPE_RATIO: f64 = 0.01;
const DEFAULT_SIGNIFICANCE_ALPHA: f64 = 0.05;
const DEFAULT_OUTLIER_Z_THRESHOLD: f64 = 2.0;
const DEFAULT_SEVERE_OUTLIER_Z_THRESHOLD: f64 = 3.0;
const DEFAULT_BENCHMARK_TOLERANCE_PCT: f64 = 5.0;

/// Thresholds for the statistical analyzer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyzerConfig {
    /// Minimum analyzed days for `has_sufficient_data`.
    pub min_days_for_sufficiency: usize,
    /// Minimum `data_completeness` for `has_sufficient_data`.
    pub min_completeness: f64,
    /// Series shorter than this report a stable, zero-confidence trend.
    pub min_trend_points: usize,
    /// A slope is stable when `|slope| < ratio * |mean(series)|`.
    pub stable_slope_ratio: f64,
    /// Two-sided significance level.
    pub significance_alpha: f64,
    /// |z| above which a point is an outlier.
    pub outlier_z_threshold: f64,
    /// |z| above which an outlier is high severity.
    pub severe_outlier_z_threshold: f64,
    /// |% difference| below which a metric sits at benchmark.
    pub benchmark_tolerance_pct: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_days_for_sufficiency: DEFAULT_MIN_DAYS_FOR_SUFFICIENCY,
            min_completeness: DEFAULT_MIN_COMPLETENESS,
            min_trend_points: DEFAULT_MIN_TREND_POINTS,
            stable_slope_ratio: DEFAULT_STABLE_SLOPE_RATIO,
            significance_alpha: DEFAULT_SIGNIFICANCE_ALPHA,
            outlier_z_threshold: DEFAULT_OUTLIER_Z_THRESHOLD,
            severe_outlier_z_threshold: DEFAULT_SEVERE_OUTLIER_Z_THRESHOLD,
            benchmark_tolerance_pct: DEFAULT_BENCHMARK_TOLERANCE_PCT,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), AdperfError> {
        if self.min_trend_points < 2 {
            return Err(AdperfError::invalid_input(format!(
                "AnalyzerConfig.min_trend_points must be >= 2, got {}",
                self.min_trend_points
            )));
        }
        for (name, value) in [
            ("min_completeness", self.min_completeness),
            ("stable_slope_ratio", self.stable_slope_ratio),
            ("significance_alpha", self.significance_alpha),
            ("outlier_z_threshold", self.outlier_z_threshold),
            (
                "severe_outlier_z_threshold",
                self.severe_outlier_z_threshold,
            ),
            ("benchmark_tolerance_pct", self.benchmark_tolerance_pct),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AdperfError::invalid_input(format!(
                    "AnalyzerConfig.{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.min_completeness) {
            return Err(AdperfError::invalid_input(format!(
                "AnalyzerConfig.min_completeness must be within [0, 1], got {}",
                self.min_completeness
            )));
        }
        if self.significance_alpha >= 1.0 {
            return Err(AdperfError::invalid_input(format!(
                "AnalyzerConfig.significance_alpha must be < 1, got {}",
                self.significance_alpha
            )));
        }
        if self.severe_outlier_z_threshold < self.outlier_z_threshold {
            return Err(AdperfError::invalid_input(format!(
                "AnalyzerConfig.severe_outlier_z_threshold ({}) must be >= outlier_z_threshold ({})",
                self.severe_outlier_z_threshold, self.outlier_z_threshold
            )));
        }
        Ok(())
    }
}
