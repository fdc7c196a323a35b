// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::prioritizer::prioritize;
use adperf_core::{
    AdperfError, CampaignSettings, KeywordPerformance, MetricsRepository,
    RecommendationHistoryRepository, SearchTermPerformance,
};
use adperf_impact::{EstimatorConfig, RecommendationImpact, estimate_impact};
use adperf_rules::{CandidateRecommendation, Generator, GeneratorConfig};
use adperf_stats::{AnalyzerConfig, PerformanceAnalysis, analyze};
use rayon::prelude::*;
use tracing::{debug, warn};

/// One campaign's analysis request.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    pub campaign_id: String,
    /// Requested window length in days; also the expected-days denominator
    /// for data completeness.
    pub lookback_days: u32,
    pub settings: CampaignSettings,
    pub keywords: Vec<KeywordPerformance>,
    pub search_terms: Vec<SearchTermPerformance>,
}

/// A candidate paired with its quantified impact, in final rank order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRecommendation {
    pub candidate: CandidateRecommendation,
    pub impact: RecommendationImpact,
}

/// Everything the Sink consumes for one campaign.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutcome {
    pub analysis: PerformanceAnalysis,
    pub recommendations: Vec<RankedRecommendation>,
}

/// The four-stage pipeline: analyze, generate, estimate, prioritize.
///
/// Stateless between runs; every stage is a pure function of the fetched
/// series and the request, so re-running the same inputs yields identical
/// output. Repositories are injected and own all I/O policy.
pub struct Pipeline {
    analyzer_config: AnalyzerConfig,
    generator: Generator,
    estimator_config: EstimatorConfig,
}

impl Pipeline {
    /// Pipeline with default configuration for every stage.
    pub fn new() -> Result<Self, AdperfError> {
        Self::with_configs(
            AnalyzerConfig::default(),
            GeneratorConfig::default(),
            EstimatorConfig::default(),
        )
    }

    pub fn with_configs(
        analyzer_config: AnalyzerConfig,
        generator_config: GeneratorConfig,
        estimator_config: EstimatorConfig,
    ) -> Result<Self, AdperfError> {
        analyzer_config.validate()?;
        estimator_config.validate()?;
        Ok(Self {
            analyzer_config,
            generator: Generator::new(generator_config)?,
            estimator_config,
        })
    }

    pub fn generator_mut(&mut self) -> &mut Generator {
        &mut self.generator
    }

    /// Runs the full pipeline for one campaign.
    ///
    /// An empty metric series is the one hard error surfaced from the
    /// collaborator side: the campaign (or its data) was not found.
    pub fn run(
        &self,
        metrics: &dyn MetricsRepository,
        history: Option<&dyn RecommendationHistoryRepository>,
        request: &AnalysisRequest,
    ) -> Result<PipelineOutcome, AdperfError> {
        let records = metrics.daily_metrics(&request.campaign_id, request.lookback_days)?;
        if records.is_empty() {
            return Err(AdperfError::not_found(format!(
                "campaign {} has no metrics in the last {} days",
                request.campaign_id, request.lookback_days
            )));
        }

        let analysis = analyze(
            &request.campaign_id,
            &records,
            request.lookback_days as usize,
            &self.analyzer_config,
        )?;
        if !analysis.data_quality.has_sufficient_data {
            warn!(
                campaign_id = %request.campaign_id,
                days_analyzed = analysis.days_analyzed,
                completeness = analysis.data_quality.data_completeness,
                "window below sufficiency thresholds; recommendations will carry low confidence"
            );
        }
        debug!(
            campaign_id = %request.campaign_id,
            days_analyzed = analysis.days_analyzed,
            health = analysis.summary.overall_health.as_str(),
            "statistical analysis complete"
        );

        let candidates = self.generator.generate(
            &analysis,
            &request.settings,
            &request.keywords,
            &request.search_terms,
        );
        debug!(
            campaign_id = %request.campaign_id,
            candidates = candidates.len(),
            "rule evaluation complete"
        );

        let mut ranked = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let impact = estimate_impact(&candidate, &analysis, history, &self.estimator_config)?;
            ranked.push(RankedRecommendation { candidate, impact });
        }
        let recommendations = prioritize(ranked);
        debug!(
            campaign_id = %request.campaign_id,
            recommendations = recommendations.len(),
            "pipeline complete"
        );

        Ok(PipelineOutcome {
            analysis,
            recommendations,
        })
    }

    /// Runs independent campaigns in parallel; results keep request order
    /// and failures stay per-campaign.
    pub fn run_many(
        &self,
        metrics: &(dyn MetricsRepository + Sync),
        history: Option<&(dyn RecommendationHistoryRepository + Sync)>,
        requests: &[AnalysisRequest],
    ) -> Vec<Result<PipelineOutcome, AdperfError>> {
        requests
            .par_iter()
            .map(|request| {
                self.run(
                    metrics as &dyn MetricsRepository,
                    history.map(|h| h as &dyn RecommendationHistoryRepository),
                    request,
                )
            })
            .collect()
    }
}
