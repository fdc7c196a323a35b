// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::engine::{CategoryHandler, RecommendationCategory, RuleContext};
use crate::types::{CandidateRecommendation, SuggestedChange};
use adperf_core::{BiddingStrategy, MetricKind, Priority, RecommendationType};
use adperf_stats::OverallHealth;

const STRATEGY_CONFIDENCE: f64 = 0.70;

/// Proposes moving a manually bid campaign to target-CPA bidding once it has
/// the conversion volume automated bidding needs to learn from.
pub struct BiddingStrategyHandler;

impl CategoryHandler for BiddingStrategyHandler {
    fn category(&self) -> RecommendationCategory {
        RecommendationCategory::BiddingStrategy
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation> {
        if ctx.settings.bidding_strategy != BiddingStrategy::ManualCpc {
            return vec![];
        }
        let Some(target) = ctx.settings.target_cpa else {
            return vec![];
        };
        if ctx.analysis.summary.overall_health == OverallHealth::Poor {
            return vec![];
        }
        let conversions = ctx.window_conversions();
        if conversions < ctx.config.strategy_min_conversions {
            return vec![];
        }

        let improvement = ctx.config.strategy_cpa_improvement_pct;
        vec![CandidateRecommendation {
            rec_type: RecommendationType::BiddingStrategyChange,
            campaign_id: ctx.analysis.campaign_id.clone(),
            title: "Switch to target-CPA bidding".to_string(),
            description: format!(
                "Move from manual CPC to target-CPA bidding at a ${target:.2} target; the window's {conversions:.1} conversions give the bidder enough signal."
            ),
            reasoning: format!(
                "{:.1} conversions in the window meets the {:.1} minimum for automated bidding, and campaign health supports the change.",
                conversions, ctx.config.strategy_min_conversions
            ),
            expected_impact: format!("{:+.1}% cost per conversion", -improvement),
            impact_metric: MetricKind::CostPerConversion,
            impact_value: -improvement,
            confidence_score: STRATEGY_CONFIDENCE,
            priority: Priority::Medium,
            suggested_change: SuggestedChange::BiddingStrategy {
                from: BiddingStrategy::ManualCpc,
                to: BiddingStrategy::TargetCpa,
            },
        }]
    }
}
