// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod analyzer;
pub mod benchmark;
pub mod config;
pub mod descriptive;
pub mod interval;
pub mod outlier;
pub mod quality;
pub mod significance;
pub mod summary;
pub mod trend;

pub use analyzer::{PerformanceAnalysis, analyze};
pub use benchmark::{BenchmarkStatus, PerformanceBenchmark, benchmark_performance};
pub use config::AnalyzerConfig;
pub use interval::{ConfidenceInterval, confidence_interval};
pub use outlier::{OutlierDetection, OutlierSeverity, detect_outliers};
pub use quality::{DataQuality, assess_data_quality};
pub use significance::{SignificanceTestResult, half_window_significance};
pub use summary::{AnalysisSummary, OverallHealth, synthesize_summary};
pub use trend::{TrendAnalysis, TrendDirection, linear_trend};

/// Statistical analyzer namespace.
pub fn crate_name() -> &'static str {
    let _ = adperf_core::crate_name();
    "adperf-stats"
}
