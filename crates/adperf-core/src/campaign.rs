// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::metrics::safe_ratio;

/// Platform bidding strategy the campaign currently runs under.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiddingStrategy {
    ManualCpc,
    TargetCpa,
    TargetRoas,
    MaximizeConversions,
    MaximizeClicks,
}

impl BiddingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManualCpc => "MANUAL_CPC",
            Self::TargetCpa => "TARGET_CPA",
            Self::TargetRoas => "TARGET_ROAS",
            Self::MaximizeConversions => "MAXIMIZE_CONVERSIONS",
            Self::MaximizeClicks => "MAXIMIZE_CLICKS",
        }
    }
}

/// Campaign configuration the rule tables key on.
///
/// Budget and targets are optional: rules that depend on a missing field are
/// skipped rather than erroring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignSettings {
    pub campaign_id: String,
    pub budget: Option<f64>,
    pub target_cpa: Option<f64>,
    pub target_roas: Option<f64>,
    pub bidding_strategy: BiddingStrategy,
}

/// Lookback-window aggregate for a single keyword.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordPerformance {
    pub keyword_id: String,
    pub text: String,
    pub cost: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub conversions: f64,
    /// Platform-assigned relevance score, 1-10; absent for new keywords.
    pub quality_score: Option<u8>,
}

impl KeywordPerformance {
    pub fn cpa(&self) -> f64 {
        safe_ratio(self.cost, self.conversions)
    }

    pub fn ctr(&self) -> f64 {
        safe_ratio(self.clicks as f64, self.impressions as f64)
    }

    pub fn conversion_rate(&self) -> f64 {
        safe_ratio(self.conversions, self.clicks as f64)
    }
}

/// Lookback-window aggregate for a single search term.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SearchTermPerformance {
    pub term: String,
    pub cost: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub conversions: f64,
}

impl SearchTermPerformance {
    pub fn cpa(&self) -> f64 {
        safe_ratio(self.cost, self.conversions)
    }

    pub fn conversion_rate(&self) -> f64 {
        safe_ratio(self.conversions, self.clicks as f64)
    }
}
