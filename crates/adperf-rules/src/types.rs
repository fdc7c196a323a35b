// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use adperf_core::{BiddingStrategy, MetricKind, Priority, RecommendationType};

/// Structured action payload, one variant per recommendation type.
///
/// Replaces the source system's string-keyed bag of optional properties:
/// every variant carries exactly the fields its action needs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum SuggestedChange {
    Budget {
        current_budget: f64,
        suggested_budget: f64,
        change_percentage: f64,
    },
    PauseKeyword {
        keyword_id: String,
        keyword_text: String,
    },
    ScaleKeyword {
        keyword_id: String,
        keyword_text: String,
        spend_increase_percentage: f64,
    },
    OptimizeKeyword {
        keyword_id: String,
        keyword_text: String,
        action: String,
    },
    NegativeKeyword {
        term: String,
        estimated_savings: f64,
    },
    BidAdjustment {
        percentage: f64,
    },
    BiddingStrategy {
        from: BiddingStrategy,
        to: BiddingStrategy,
    },
}

/// One candidate action produced by the rule tables, before impact
/// estimation and prioritization.
///
/// The title/description/reasoning strings embed the computed figures
/// (currency to 2 decimals, percentages to 1) and are part of the observable
/// contract.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateRecommendation {
    pub rec_type: RecommendationType,
    pub campaign_id: String,
    pub title: String,
    pub description: String,
    pub reasoning: String,
    pub expected_impact: String,
    /// Metric the impact estimate is expressed against.
    pub impact_metric: MetricKind,
    /// Signed percentage change expected on `impact_metric`.
    pub impact_value: f64,
    pub confidence_score: f64,
    pub priority: Priority,
    pub suggested_change: SuggestedChange,
}
