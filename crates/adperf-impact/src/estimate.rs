// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::confidence::composite_confidence;
use crate::config::EstimatorConfig;
use crate::tables::{TimeToImpact, time_to_impact};
use adperf_core::{MetricKind, RecommendationType};
use adperf_stats::PerformanceAnalysis;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// 95% interval around the expected new metric value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactRange {
    pub lower: f64,
    pub upper: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskAssessment {
    pub best_case: f64,
    pub worst_case: f64,
    pub expected_case: f64,
    pub risk_level: RiskLevel,
    pub upside: f64,
    pub downside: f64,
}

/// Projected effect of a recommendation on one metric.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEstimate {
    pub metric: MetricKind,
    pub current_value: f64,
    pub expected_change: f64,
    pub expected_change_percentage: f64,
    pub expected_new_value: f64,
    pub confidence_interval: ImpactRange,
    pub risk_assessment: RiskAssessment,
    pub confidence_score: f64,
    pub sample_size: usize,
    pub standard_error: f64,
    pub projected_monthly_impact: f64,
    pub time_to_impact: TimeToImpact,
}

/// Projects a signed percentage change onto a metric's window mean.
///
/// The current value, standard error, and sample size come from the
/// analysis's confidence-interval report; a metric absent from the window
/// degrades to a zero-valued, high-risk estimate rather than erroring.
pub fn build_estimate(
    metric: MetricKind,
    pct: f64,
    rec_type: RecommendationType,
    analysis: &PerformanceAnalysis,
    cfg: &EstimatorConfig,
) -> ImpactEstimate {
    let (current_value, metric_se, sample_size) = analysis
        .confidence_interval(metric)
        .map_or((0.0, 0.0, 0), |ci| {
            (ci.mean, ci.standard_error, ci.sample_size)
        });

    let expected_change = current_value * pct / 100.0;
    let expected_new_value = current_value + expected_change;
    let standard_error = metric_se * (pct / 100.0).abs();
    let margin = cfg.impact_margin_z * standard_error;
    let confidence_interval = ImpactRange {
        lower: expected_new_value - margin,
        upper: expected_new_value + margin,
    };

    let relative_uncertainty = if current_value == 0.0 {
        f64::INFINITY
    } else {
        (confidence_interval.upper - confidence_interval.lower) / current_value.abs()
    };
    let risk_level = if relative_uncertainty < cfg.risk_low_threshold {
        RiskLevel::Low
    } else if relative_uncertainty < cfg.risk_medium_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    ImpactEstimate {
        metric,
        current_value,
        expected_change,
        expected_change_percentage: pct,
        expected_new_value,
        confidence_interval,
        risk_assessment: RiskAssessment {
            best_case: confidence_interval.upper,
            worst_case: confidence_interval.lower,
            expected_case: expected_new_value,
            risk_level,
            upside: confidence_interval.upper - expected_new_value,
            downside: expected_new_value - confidence_interval.lower,
        },
        confidence_score: composite_confidence(metric, analysis),
        sample_size,
        standard_error,
        projected_monthly_impact: expected_change * cfg.projection_days,
        time_to_impact: time_to_impact(rec_type),
    }
}
