// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::AnalyzerConfig;
use crate::descriptive::mean;
use adperf_core::MetricKind;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchmarkStatus {
    AboveBenchmark,
    AtBenchmark,
    BelowBenchmark,
}

impl BenchmarkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AboveBenchmark => "above_benchmark",
            Self::AtBenchmark => "at_benchmark",
            Self::BelowBenchmark => "below_benchmark",
        }
    }
}

/// Recent-half mean measured against the historical-half mean.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceBenchmark {
    pub metric: MetricKind,
    pub recent_mean: f64,
    pub historical_mean: f64,
    pub percentage_difference: f64,
    pub status: BenchmarkStatus,
}

/// Compares the recent half of the window to the historical half. Returns
/// None when either half is empty (window of one day or less).
pub fn benchmark_performance(
    metric: MetricKind,
    series: &[f64],
    cfg: &AnalyzerConfig,
) -> Option<PerformanceBenchmark> {
    let split = series.len() / 2;
    if split == 0 {
        return None;
    }
    let historical_mean = mean(&series[..split]);
    let recent_mean = mean(&series[split..]);

    let percentage_difference = if historical_mean == 0.0 {
        0.0
    } else {
        (recent_mean - historical_mean) / historical_mean * 100.0
    };

    let status = if percentage_difference.abs() < cfg.benchmark_tolerance_pct {
        BenchmarkStatus::AtBenchmark
    } else if percentage_difference > 0.0 {
        BenchmarkStatus::AboveBenchmark
    } else {
        BenchmarkStatus::BelowBenchmark
    };

    Some(PerformanceBenchmark {
        metric,
        recent_mean,
        historical_mean,
        percentage_difference,
        status,
    })
}
