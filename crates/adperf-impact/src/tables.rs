// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use adperf_core::{MetricKind, RecommendationType};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImplementationComplexity {
    Low,
    Medium,
    High,
}

impl ImplementationComplexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeToImpact {
    Immediate,
    OneToTwoWeeks,
    TwoToFourWeeks,
}

impl TimeToImpact {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::OneToTwoWeeks => "1-2 weeks",
            Self::TwoToFourWeeks => "2-4 weeks",
        }
    }
}

/// Metric the primary impact estimate is expressed against, per type.
pub fn primary_metric(rec_type: RecommendationType) -> MetricKind {
    match rec_type {
        RecommendationType::BudgetAdjustment
        | RecommendationType::KeywordOptimization
        | RecommendationType::PauseCampaign
        | RecommendationType::PauseKeyword
        | RecommendationType::NegativeKeyword => MetricKind::Cost,
        RecommendationType::BidAdjustment | RecommendationType::BiddingStrategyChange => {
            MetricKind::CostPerConversion
        }
        RecommendationType::AdCreative => MetricKind::Conversions,
    }
}

/// Fixed effort tier per type; drives the ROI implementation cost.
pub fn implementation_complexity(rec_type: RecommendationType) -> ImplementationComplexity {
    match rec_type {
        RecommendationType::BudgetAdjustment
        | RecommendationType::BidAdjustment
        | RecommendationType::PauseCampaign
        | RecommendationType::PauseKeyword
        | RecommendationType::NegativeKeyword => ImplementationComplexity::Low,
        RecommendationType::KeywordOptimization
        | RecommendationType::BiddingStrategyChange => ImplementationComplexity::Medium,
        RecommendationType::AdCreative => ImplementationComplexity::High,
    }
}

/// How soon the change shows up in the metrics.
pub fn time_to_impact(rec_type: RecommendationType) -> TimeToImpact {
    match rec_type {
        RecommendationType::BudgetAdjustment
        | RecommendationType::BidAdjustment
        | RecommendationType::PauseCampaign
        | RecommendationType::PauseKeyword
        | RecommendationType::NegativeKeyword => TimeToImpact::Immediate,
        RecommendationType::KeywordOptimization
        | RecommendationType::BiddingStrategyChange => TimeToImpact::OneToTwoWeeks,
        RecommendationType::AdCreative => TimeToImpact::TwoToFourWeeks,
    }
}

/// Type-specific spillovers onto secondary metrics, as (metric, signed %)
/// pairs derived from the primary percentage.
///
/// Budget increases pass 70% of their growth through to conversions; budget
/// cuts improve CPA at 50%. Keyword-level spend cuts improve CPA at 80%.
/// Bid changes move volume at 60% and partially rebound CPA at 40%. A
/// strategy switch passes half of its CPA improvement through to conversion
/// volume.
pub fn secondary_spillovers(
    rec_type: RecommendationType,
    primary_pct: f64,
) -> Vec<(MetricKind, f64)> {
    match rec_type {
        RecommendationType::BudgetAdjustment => {
            if primary_pct > 0.0 {
                vec![(MetricKind::Conversions, 0.7 * primary_pct)]
            } else if primary_pct < 0.0 {
                vec![(MetricKind::CostPerConversion, 0.5 * primary_pct)]
            } else {
                vec![]
            }
        }
        RecommendationType::KeywordOptimization
        | RecommendationType::PauseKeyword
        | RecommendationType::NegativeKeyword => {
            vec![(MetricKind::CostPerConversion, 0.8 * primary_pct)]
        }
        RecommendationType::BidAdjustment => vec![
            (MetricKind::Conversions, 0.6 * primary_pct),
            (MetricKind::CostPerConversion, -0.4 * primary_pct),
        ],
        RecommendationType::BiddingStrategyChange => {
            vec![(MetricKind::Conversions, -0.5 * primary_pct)]
        }
        RecommendationType::PauseCampaign | RecommendationType::AdCreative => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ImplementationComplexity, TimeToImpact, implementation_complexity, primary_metric,
        secondary_spillovers, time_to_impact,
    };
    use adperf_core::{MetricKind, RecommendationType};

    #[test]
    fn primary_metric_lookup_matches_type_table() {
        assert_eq!(
            primary_metric(RecommendationType::BudgetAdjustment),
            MetricKind::Cost
        );
        assert_eq!(
            primary_metric(RecommendationType::BidAdjustment),
            MetricKind::CostPerConversion
        );
        assert_eq!(
            primary_metric(RecommendationType::AdCreative),
            MetricKind::Conversions
        );
        assert_eq!(
            primary_metric(RecommendationType::NegativeKeyword),
            MetricKind::Cost
        );
    }

    #[test]
    fn budget_spillover_depends_on_direction() {
        let up = secondary_spillovers(RecommendationType::BudgetAdjustment, 20.0);
        assert_eq!(up, vec![(MetricKind::Conversions, 14.0)]);

        let down = secondary_spillovers(RecommendationType::BudgetAdjustment, -30.0);
        assert_eq!(down, vec![(MetricKind::CostPerConversion, -15.0)]);

        let flat = secondary_spillovers(RecommendationType::BudgetAdjustment, 0.0);
        assert!(flat.is_empty());
    }

    #[test]
    fn keyword_cuts_improve_cpa_at_eighty_percent() {
        let spill = secondary_spillovers(RecommendationType::PauseKeyword, -10.0);
        assert_eq!(spill, vec![(MetricKind::CostPerConversion, -8.0)]);
    }

    #[test]
    fn bid_spillover_carries_volume_and_rebound_terms() {
        let spill = secondary_spillovers(RecommendationType::BidAdjustment, -12.0);
        assert_eq!(
            spill,
            vec![
                (MetricKind::Conversions, -7.2),
                (MetricKind::CostPerConversion, 4.8),
            ]
        );
    }

    #[test]
    fn strategy_switch_passes_half_of_cpa_gain_to_volume() {
        let spill = secondary_spillovers(RecommendationType::BiddingStrategyChange, -10.0);
        assert_eq!(spill, vec![(MetricKind::Conversions, 5.0)]);
    }

    #[test]
    fn complexity_and_latency_tiers_are_fixed_per_type() {
        assert_eq!(
            implementation_complexity(RecommendationType::BudgetAdjustment),
            ImplementationComplexity::Low
        );
        assert_eq!(
            implementation_complexity(RecommendationType::KeywordOptimization),
            ImplementationComplexity::Medium
        );
        assert_eq!(
            implementation_complexity(RecommendationType::AdCreative),
            ImplementationComplexity::High
        );

        assert_eq!(
            time_to_impact(RecommendationType::PauseKeyword),
            TimeToImpact::Immediate
        );
        assert_eq!(
            time_to_impact(RecommendationType::BiddingStrategyChange),
            TimeToImpact::OneToTwoWeeks
        );
        assert_eq!(time_to_impact(RecommendationType::AdCreative).as_str(), "2-4 weeks");
    }
}
