// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::engine::{CategoryHandler, RecommendationCategory, RuleContext};
use crate::types::{CandidateRecommendation, SuggestedChange};
use adperf_core::{BiddingStrategy, MetricKind, Priority, RecommendationType};
use adperf_stats::{OverallHealth, TrendDirection};

const INCREASE_CONFIDENCE: f64 = 0.75;

/// Bid rule table. Only meaningful for manually bid campaigns on the
/// defensive side; the expansion rule applies regardless of strategy.
pub struct BidHandler;

impl CategoryHandler for BidHandler {
    fn category(&self) -> RecommendationCategory {
        RecommendationCategory::Bid
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation> {
        let cpa_trend = ctx.cpa_trend();
        let cpa_direction = cpa_trend.map(|t| t.direction);
        let conversions_direction = ctx.conversions_trend().map(|t| t.direction);

        if ctx.settings.bidding_strategy == BiddingStrategy::ManualCpc
            && cpa_direction == Some(TrendDirection::Increasing)
        {
            let pct = ctx.config.bid_adjustment_pct;
            // Confidence rides on how well the regression explains the CPA
            // movement.
            let confidence = cpa_trend.map_or(0.0, |t| t.confidence);
            let change_pct = cpa_trend.map_or(0.0, |t| t.change_percentage);
            return vec![CandidateRecommendation {
                rec_type: RecommendationType::BidAdjustment,
                campaign_id: ctx.analysis.campaign_id.clone(),
                title: format!("Lower manual bids by {pct:.1}%"),
                description: format!(
                    "Reduce manual CPC bids by {pct:.1}% to pull cost per conversion back toward target."
                ),
                reasoning: format!(
                    "Cost per conversion is trending up ({change_pct:+.1}% over the window) under manual bidding; a bid reduction is the most direct lever."
                ),
                expected_impact: format!("{:+.1}% cost per conversion", -pct),
                impact_metric: MetricKind::CostPerConversion,
                impact_value: -pct,
                confidence_score: confidence,
                priority: Priority::High,
                suggested_change: SuggestedChange::BidAdjustment { percentage: -pct },
            }];
        }

        if ctx.analysis.summary.overall_health == OverallHealth::Excellent
            && cpa_direction == Some(TrendDirection::Decreasing)
            && conversions_direction != Some(TrendDirection::Decreasing)
        {
            let pct = ctx.config.bid_adjustment_pct;
            return vec![CandidateRecommendation {
                rec_type: RecommendationType::BidAdjustment,
                campaign_id: ctx.analysis.campaign_id.clone(),
                title: format!("Raise bids by {pct:.1}%"),
                description: format!(
                    "Increase bids by {pct:.1}% to capture more volume while efficiency is strong."
                ),
                reasoning:
                    "Campaign health is excellent, cost per conversion is falling, and conversions are holding; there is headroom to buy more traffic."
                        .to_string(),
                expected_impact: format!("{pct:+.1}% cost per conversion for added volume"),
                impact_metric: MetricKind::CostPerConversion,
                impact_value: pct,
                confidence_score: INCREASE_CONFIDENCE,
                priority: Priority::Medium,
                suggested_change: SuggestedChange::BidAdjustment { percentage: pct },
            }];
        }

        vec![]
    }
}
