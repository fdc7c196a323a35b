// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod pipeline;
pub mod prioritizer;

pub use pipeline::{AnalysisRequest, Pipeline, PipelineOutcome, RankedRecommendation};
pub use prioritizer::prioritize;

/// Pipeline orchestration namespace.
pub fn crate_name() -> &'static str {
    let _ = (
        adperf_core::crate_name(),
        adperf_stats::crate_name(),
        adperf_rules::crate_name(),
        adperf_impact::crate_name(),
    );
    "adperf-pipeline"
}
