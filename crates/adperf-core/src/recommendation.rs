// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Action category of a recommendation. New categories are added by
/// registering a handler with the generator and extending the estimator's
/// lookup tables; no dispatch lives outside those tables.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecommendationType {
    BudgetAdjustment,
    KeywordOptimization,
    BidAdjustment,
    AdCreative,
    PauseCampaign,
    PauseKeyword,
    NegativeKeyword,
    BiddingStrategyChange,
}

impl RecommendationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BudgetAdjustment => "budget_adjustment",
            Self::KeywordOptimization => "keyword_optimization",
            Self::BidAdjustment => "bid_adjustment",
            Self::AdCreative => "ad_creative",
            Self::PauseCampaign => "pause_campaign",
            Self::PauseKeyword => "pause_keyword",
            Self::NegativeKeyword => "negative_keyword",
            Self::BiddingStrategyChange => "bidding_strategy_change",
        }
    }
}

/// Priority tier; the prioritizer sorts Critical < High < Medium < Low.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank; lower comes first in the final list.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A past recommendation the Sink recorded as implemented, used for
/// historical validation of new impact estimates.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ImplementedRecommendation {
    pub rec_type: RecommendationType,
    /// Expected impact at recommendation time, signed percent.
    pub impact_value: f64,
    /// Measured impact after implementation, signed percent; None while the
    /// measurement window is still open.
    pub actual_impact_value: Option<f64>,
}
