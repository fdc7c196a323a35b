// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod confidence;
pub mod config;
pub mod estimate;
pub mod estimator;
pub mod history;
pub mod score;
pub mod tables;

pub use confidence::composite_confidence;
pub use config::EstimatorConfig;
pub use estimate::{ImpactEstimate, ImpactRange, RiskAssessment, RiskLevel, build_estimate};
pub use estimator::{RecommendationImpact, estimate_impact};
pub use history::{HistoricalValidation, ValidationConfidence, validate_against_history};
pub use score::{expected_roi, overall_score};
pub use tables::{
    ImplementationComplexity, TimeToImpact, implementation_complexity, primary_metric,
    secondary_spillovers, time_to_impact,
};

/// Impact estimation namespace.
pub fn crate_name() -> &'static str {
    let _ = (
        adperf_core::crate_name(),
        adperf_stats::crate_name(),
        adperf_rules::crate_name(),
    );
    "adperf-impact"
}
