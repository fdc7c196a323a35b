// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::EstimatorConfig;
use crate::estimate::{ImpactEstimate, build_estimate};
use crate::history::{HistoricalValidation, validate_against_history};
use crate::score::{expected_roi, overall_score};
use crate::tables::{
    ImplementationComplexity, implementation_complexity, primary_metric, secondary_spillovers,
};
use adperf_core::{AdperfError, RecommendationHistoryRepository, RecommendationType};
use adperf_rules::CandidateRecommendation;
use adperf_stats::PerformanceAnalysis;

/// Quantified impact attached to one candidate recommendation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationImpact {
    pub rec_type: RecommendationType,
    pub primary_impact: ImpactEstimate,
    pub secondary_impacts: Vec<ImpactEstimate>,
    pub overall_score: f64,
    pub implementation_complexity: ImplementationComplexity,
    pub expected_roi: f64,
    pub historical_validation: Option<HistoricalValidation>,
}

/// Builds the full impact report for one candidate: primary estimate on the
/// type's fixed metric, type-specific secondary spillovers, overall score,
/// ROI against the fixed effort tier, and (when a history repository is
/// supplied) validation against past implemented recommendations.
pub fn estimate_impact(
    candidate: &CandidateRecommendation,
    analysis: &PerformanceAnalysis,
    history: Option<&dyn RecommendationHistoryRepository>,
    cfg: &EstimatorConfig,
) -> Result<RecommendationImpact, AdperfError> {
    cfg.validate()?;

    let rec_type = candidate.rec_type;
    let pct = candidate.impact_value;

    let primary_impact = build_estimate(primary_metric(rec_type), pct, rec_type, analysis, cfg);
    let secondary_impacts: Vec<ImpactEstimate> = secondary_spillovers(rec_type, pct)
        .into_iter()
        .map(|(metric, secondary_pct)| {
            build_estimate(metric, secondary_pct, rec_type, analysis, cfg)
        })
        .collect();

    let complexity = implementation_complexity(rec_type);
    let score = overall_score(&primary_impact, &secondary_impacts);
    let roi = expected_roi(&primary_impact, &secondary_impacts, complexity, cfg);
    let historical_validation = match history {
        Some(repository) => validate_against_history(repository, rec_type, pct, cfg)?,
        None => None,
    };

    Ok(RecommendationImpact {
        rec_type,
        primary_impact,
        secondary_impacts,
        overall_score: score,
        implementation_complexity: complexity,
        expected_roi: roi,
        historical_validation,
    })
}
