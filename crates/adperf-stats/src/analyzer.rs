// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::benchmark::{PerformanceBenchmark, benchmark_performance};
use crate::config::AnalyzerConfig;
use crate::interval::{ConfidenceInterval, confidence_interval};
use crate::outlier::{OutlierDetection, OutlierSeverity, detect_outliers};
use crate::quality::{DataQuality, assess_data_quality};
use crate::significance::{SignificanceTestResult, half_window_significance};
use crate::summary::{AnalysisSummary, synthesize_summary};
use crate::trend::{TrendAnalysis, linear_trend};
use adperf_core::{AdperfError, MetricKind, MetricRecord};
use chrono::NaiveDate;

/// Full statistical report over one campaign's lookback window.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceAnalysis {
    pub campaign_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub days_analyzed: usize,
    pub data_quality: DataQuality,
    pub significance_tests: Vec<SignificanceTestResult>,
    pub trends: Vec<TrendAnalysis>,
    pub benchmarks: Vec<PerformanceBenchmark>,
    pub outliers: Vec<OutlierDetection>,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub summary: AnalysisSummary,
}

impl PerformanceAnalysis {
    pub fn trend(&self, metric: MetricKind) -> Option<&TrendAnalysis> {
        self.trends.iter().find(|t| t.metric == metric)
    }

    pub fn significance(&self, metric: MetricKind) -> Option<&SignificanceTestResult> {
        self.significance_tests.iter().find(|t| t.metric == metric)
    }

    pub fn benchmark(&self, metric: MetricKind) -> Option<&PerformanceBenchmark> {
        self.benchmarks.iter().find(|b| b.metric == metric)
    }

    pub fn confidence_interval(&self, metric: MetricKind) -> Option<&ConfidenceInterval> {
        self.confidence_intervals.iter().find(|c| c.metric == metric)
    }

    pub fn high_severity_outlier_count(&self) -> usize {
        self.outliers
            .iter()
            .filter(|o| o.severity == OutlierSeverity::High)
            .count()
    }
}

/// Runs every statistical report over the window and synthesizes the
/// qualitative summary.
///
/// `expected_days` is the requested lookback length; `records` must be
/// ordered by date ascending with no duplicate days. Statistical
/// degeneracies inside the window are fail-soft; only an empty window or a
/// malformed call errors.
pub fn analyze(
    campaign_id: &str,
    records: &[MetricRecord],
    expected_days: usize,
    cfg: &AnalyzerConfig,
) -> Result<PerformanceAnalysis, AdperfError> {
    cfg.validate()?;
    if records.is_empty() {
        return Err(AdperfError::invalid_input(
            "analysis requires at least one metric record",
        ));
    }
    if expected_days == 0 {
        return Err(AdperfError::invalid_input("expected_days must be >= 1"));
    }
    if let Some(pair) = records.windows(2).find(|pair| pair[0].date >= pair[1].date) {
        return Err(AdperfError::invalid_input(format!(
            "metric records must be strictly ordered by date: {} >= {}",
            pair[0].date, pair[1].date
        )));
    }

    let days_analyzed = records.len();
    let data_quality = assess_data_quality(days_analyzed, expected_days, cfg);

    let mut significance_tests = Vec::with_capacity(MetricKind::ALL.len());
    let mut trends = Vec::with_capacity(MetricKind::ALL.len());
    let mut benchmarks = Vec::with_capacity(MetricKind::ALL.len());
    let mut outliers = vec![];
    let mut confidence_intervals = Vec::with_capacity(MetricKind::ALL.len());

    for metric in MetricKind::ALL {
        let series = metric.series_from(records);
        significance_tests.push(half_window_significance(metric, &series, cfg));
        trends.push(linear_trend(metric, &series, cfg));
        if let Some(benchmark) = benchmark_performance(metric, &series, cfg) {
            benchmarks.push(benchmark);
        }
        outliers.extend(detect_outliers(metric, records, cfg));
        if let Some(interval) = confidence_interval(metric, &series) {
            confidence_intervals.push(interval);
        }
    }

    let summary = synthesize_summary(
        &data_quality,
        &trends,
        &significance_tests,
        &benchmarks,
        &outliers,
    );

    Ok(PerformanceAnalysis {
        campaign_id: campaign_id.to_string(),
        period_start: records[0].date,
        period_end: records[days_analyzed - 1].date,
        days_analyzed,
        data_quality,
        significance_tests,
        trends,
        benchmarks,
        outliers,
        confidence_intervals,
        summary,
    })
}
