// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::benchmark::PerformanceBenchmark;
use crate::outlier::{OutlierDetection, OutlierSeverity};
use crate::quality::DataQuality;
use crate::significance::SignificanceTestResult;
use crate::trend::{TrendAnalysis, TrendDirection};
use adperf_core::MetricKind;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverallHealth {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl OverallHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Qualitative rollup of the full analysis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisSummary {
    pub overall_health: OverallHealth,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// A trend that moves the campaign the wrong way: CPA or cost rising, or
/// conversions falling.
pub fn is_concerning_trend(trend: &TrendAnalysis) -> bool {
    matches!(
        (trend.metric, trend.direction),
        (MetricKind::CostPerConversion, TrendDirection::Increasing)
            | (MetricKind::Conversions, TrendDirection::Decreasing)
            | (MetricKind::Cost, TrendDirection::Increasing)
    )
}

fn adverse_significant_count(
    tests: &[SignificanceTestResult],
    benchmarks: &[PerformanceBenchmark],
) -> usize {
    tests
        .iter()
        .filter(|test| test.is_significant)
        .filter(|test| {
            benchmarks
                .iter()
                .find(|b| b.metric == test.metric)
                .is_some_and(|b| {
                    if test.metric.lower_is_better() {
                        b.percentage_difference > 0.0
                    } else {
                        b.percentage_difference < 0.0
                    }
                })
        })
        .count()
}

/// Deterministic health rule table, evaluated poor -> fair -> excellent ->
/// good.
pub fn synthesize_summary(
    quality: &DataQuality,
    trends: &[TrendAnalysis],
    tests: &[SignificanceTestResult],
    benchmarks: &[PerformanceBenchmark],
    outliers: &[OutlierDetection],
) -> AnalysisSummary {
    let concerning: Vec<&TrendAnalysis> = trends
        .iter()
        .filter(|trend| is_concerning_trend(trend))
        .collect();
    let high_outliers = outliers
        .iter()
        .filter(|o| o.severity == OutlierSeverity::High)
        .count();
    let adverse = adverse_significant_count(tests, benchmarks);

    let overall_health = if !quality.has_sufficient_data
        || concerning.len() > 2
        || high_outliers > 3
    {
        OverallHealth::Poor
    } else if !concerning.is_empty() || high_outliers >= 2 {
        OverallHealth::Fair
    } else if adverse == 0 {
        OverallHealth::Excellent
    } else {
        OverallHealth::Good
    };

    let mut key_findings = vec![];
    if !quality.has_sufficient_data {
        key_findings.push(format!(
            "window covers {:.1}% of the requested days; results may be unstable",
            quality.data_completeness * 100.0
        ));
    }
    for trend in &concerning {
        key_findings.push(format!(
            "{} trending {} ({:+.1}% over the window)",
            trend.metric.as_str(),
            trend.direction.as_str(),
            trend.change_percentage
        ));
    }
    if high_outliers > 0 {
        key_findings.push(format!(
            "{high_outliers} high-severity outlier day(s) detected"
        ));
    }
    for test in tests.iter().filter(|t| t.is_significant) {
        key_findings.push(test.interpretation.clone());
    }

    let mut recommendations = vec![];
    if !quality.has_sufficient_data {
        recommendations
            .push("extend the lookback window before acting on these results".to_string());
    }
    if concerning
        .iter()
        .any(|t| t.metric == MetricKind::CostPerConversion)
    {
        recommendations
            .push("investigate rising cost per conversion before scaling spend".to_string());
    }
    if concerning
        .iter()
        .any(|t| t.metric == MetricKind::Conversions)
    {
        recommendations
            .push("review targeting and creatives to halt the conversion decline".to_string());
    }
    if concerning.iter().any(|t| t.metric == MetricKind::Cost) {
        recommendations.push("audit recent spend growth against budget limits".to_string());
    }
    if high_outliers >= 2 {
        recommendations
            .push("inspect the flagged anomalous days for tracking or billing issues".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("maintain current configuration and continue monitoring".to_string());
    }

    AnalysisSummary {
        overall_health,
        key_findings,
        recommendations,
    }
}
