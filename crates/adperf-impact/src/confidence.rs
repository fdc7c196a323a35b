// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use adperf_core::MetricKind;
use adperf_stats::PerformanceAnalysis;

const BASE_CONFIDENCE: f64 = 0.5;
const SUFFICIENCY_WEIGHT: f64 = 0.15;
const COMPLETENESS_WEIGHT: f64 = 0.15;
const SIGNIFICANCE_WEIGHT: f64 = 0.3;
const TREND_WEIGHT: f64 = 0.2;
const OUTLIER_PENALTY_STEP: f64 = 0.05;
const OUTLIER_PENALTY_CAP: f64 = 0.2;

/// Composite confidence for an impact estimate on `metric`.
///
/// `0.5 base + 0.15*sufficiency + 0.15*completeness + 0.3*significance
/// confidence + 0.2*trend confidence - 0.05 per high-severity outlier
/// (penalty capped at 0.2)`, clipped to [0, 1].
pub fn composite_confidence(metric: MetricKind, analysis: &PerformanceAnalysis) -> f64 {
    let quality = &analysis.data_quality;
    let mut confidence = BASE_CONFIDENCE;

    if quality.has_sufficient_data {
        confidence += SUFFICIENCY_WEIGHT;
    }
    confidence += COMPLETENESS_WEIGHT * quality.data_completeness;
    if let Some(test) = analysis.significance(metric) {
        confidence += SIGNIFICANCE_WEIGHT * test.confidence_level;
    }
    if let Some(trend) = analysis.trend(metric) {
        confidence += TREND_WEIGHT * trend.confidence;
    }

    let penalty = (OUTLIER_PENALTY_STEP * analysis.high_severity_outlier_count() as f64)
        .min(OUTLIER_PENALTY_CAP);

    (confidence - penalty).clamp(0.0, 1.0)
}
