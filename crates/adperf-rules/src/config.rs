// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use adperf_core::AdperfError;

const DEFAULT_MIN_KEYWORD_SPEND: f64 = 10.0;
const DEFAULT_PAUSE_SPEND_THRESHOLD: f64 = 50.0;
const DEFAULT_PAUSE_CPA_MULTIPLE: f64 = 2.0;
const DEFAULT_LOW_QUALITY_SCORE: u8 = 5;
const DEFAULT_LOW_QUALITY_CPA_MULTIPLE: f64 = 1.5;
const DEFAULT_SCALE_MIN_CONVERSIONS: f64 = 5.0;
const DEFAULT_SCALE_CPA_MULTIPLE: f64 = 0.5;
const DEFAULT_STEADY_MIN_CONVERSIONS: f64 = 3.0;
const DEFAULT_MIN_CONVERSION_RATE: f64 = 0.01;
const DEFAULT_LOW_CTR_THRESHOLD: f64 = 0.01;
const DEFAULT_NEGATIVE_HIGH_SPEND: f64 = 50.0;
const DEFAULT_NEGATIVE_MIN_SPEND: f64 = 20.0;
const DEFAULT_NEGATIVE_MIN_CLICKS: u64 = 5;
const DEFAULT_BUDGET_INCREASE_PCT: f64 = 20.0;
const DEFAULT_BUDGET_DECREASE_PCT: f64 = 30.0;
const DEFAULT_BID_ADJUSTMENT_PCT: f64 = 12.0;
const DEFAULT_SCALE_SPEND_FRACTION: f64 = 0.20;
const DEFAULT_OPTIMIZE_SAVINGS_FRACTION: f64 = 0.15;
const DEFAULT_STRATEGY_MIN_CONVERSIONS: f64 = 30.0;
const DEFAULT_STRATEGY_CPA_IMPROVEMENT_PCT: f64 = 10.0;

/// Thresholds for the recommendation rule tables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Keywords that spent less than this over the window are skipped.
    pub min_keyword_spend: f64,
    /// Spend at which a zero-conversion keyword or term is paused/excluded.
    pub pause_spend_threshold: f64,
    /// CPA above `multiple * target_cpa` pauses a converting keyword.
    pub pause_cpa_multiple: f64,
    /// Quality score strictly below this is treated as low.
    pub low_quality_score: u8,
    /// CPA multiple that pairs with a low quality score.
    pub low_quality_cpa_multiple: f64,
    /// Conversions required for the aggressive scale rule.
    pub scale_min_conversions: f64,
    /// CPA below `multiple * target_cpa` qualifies for aggressive scaling.
    pub scale_cpa_multiple: f64,
    /// Conversions required for the steady-performer scale rule.
    pub steady_min_conversions: f64,
    /// Baseline acceptable conversion rate.
    pub min_conversion_rate: f64,
    /// CTR below this flags a converting keyword for creative review.
    pub low_ctr_threshold: f64,
    /// Search-term spend for a high-priority negative keyword.
    pub negative_high_spend: f64,
    /// Search-term spend floor for CPA/conversion-rate negative rules.
    pub negative_min_spend: f64,
    /// Clicks required before a low-spend term is worth excluding.
    pub negative_min_clicks: u64,
    pub budget_increase_pct: f64,
    pub budget_decrease_pct: f64,
    pub bid_adjustment_pct: f64,
    /// Spend growth assumed when scaling a winning keyword.
    pub scale_spend_fraction: f64,
    /// Spend recovered when optimizing an off-target keyword.
    pub optimize_savings_fraction: f64,
    /// Window conversions required before proposing a strategy switch.
    pub strategy_min_conversions: f64,
    /// CPA improvement projected for a strategy switch.
    pub strategy_cpa_improvement_pct: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_keyword_spend: DEFAULT_MIN_KEYWORD_SPEND,
            pause_spend_threshold: DEFAULT_PAUSE_SPEND_THRESHOLD,
            pause_cpa_multiple: DEFAULT_PAUSE_CPA_MULTIPLE,
            low_quality_score: DEFAULT_LOW_QUALITY_SCORE,
            low_quality_cpa_multiple: DEFAULT_LOW_QUALITY_CPA_MULTIPLE,
            scale_min_conversions: DEFAULT_SCALE_MIN_CONVERSIONS,
            scale_cpa_multiple: DEFAULT_SCALE_CPA_MULTIPLE,
            steady_min_conversions: DEFAULT_STEADY_MIN_CONVERSIONS,
            min_conversion_rate: DEFAULT_MIN_CONVERSION_RATE,
            low_ctr_threshold: DEFAULT_LOW_CTR_THRESHOLD,
            negative_high_spend: DEFAULT_NEGATIVE_HIGH_SPEND,
            negative_min_spend: DEFAULT_NEGATIVE_MIN_SPEND,
            negative_min_clicks: DEFAULT_NEGATIVE_MIN_CLICKS,
            budget_increase_pct: DEFAULT_BUDGET_INCREASE_PCT,
            budget_decrease_pct: DEFAULT_BUDGET_DECREASE_PCT,
            bid_adjustment_pct: DEFAULT_BID_ADJUSTMENT_PCT,
            scale_spend_fraction: DEFAULT_SCALE_SPEND_FRACTION,
            optimize_savings_fraction: DEFAULT_OPTIMIZE_SAVINGS_FRACTION,
            strategy_min_conversions: DEFAULT_STRATEGY_MIN_CONVERSIONS,
            strategy_cpa_improvement_pct: DEFAULT_STRATEGY_CPA_IMPROVEMENT_PCT,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), AdperfError> {
        for (name, value) in [
            ("min_keyword_spend", self.min_keyword_spend),
            ("pause_spend_threshold", self.pause_spend_threshold),
            ("pause_cpa_multiple", self.pause_cpa_multiple),
            ("low_quality_cpa_multiple", self.low_quality_cpa_multiple),
            ("scale_min_conversions", self.scale_min_conversions),
            ("scale_cpa_multiple", self.scale_cpa_multiple),
            ("steady_min_conversions", self.steady_min_conversions),
            ("min_conversion_rate", self.min_conversion_rate),
            ("low_ctr_threshold", self.low_ctr_threshold),
            ("negative_high_spend", self.negative_high_spend),
            ("negative_min_spend", self.negative_min_spend),
            ("budget_increase_pct", self.budget_increase_pct),
            ("budget_decrease_pct", self.budget_decrease_pct),
            ("bid_adjustment_pct", self.bid_adjustment_pct),
            ("scale_spend_fraction", self.scale_spend_fraction),
            (
                "optimize_savings_fraction",
                self.optimize_savings_fraction,
            ),
            ("strategy_min_conversions", self.strategy_min_conversions),
            (
                "strategy_cpa_improvement_pct",
                self.strategy_cpa_improvement_pct,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AdperfError::invalid_input(format!(
                    "GeneratorConfig.{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.negative_min_spend > self.negative_high_spend {
            return Err(AdperfError::invalid_input(format!(
                "GeneratorConfig.negative_min_spend ({}) must be <= negative_high_spend ({})",
                self.negative_min_spend, self.negative_high_spend
            )));
        }
        if self.scale_cpa_multiple >= 1.0 {
            return Err(AdperfError::invalid_input(format!(
                "GeneratorConfig.scale_cpa_multiple must be < 1 to describe an under-target CPA, got {}",
                self.scale_cpa_multiple
            )));
        }
        if self.low_quality_score == 0 || self.low_quality_score > 10 {
            return Err(AdperfError::invalid_input(format!(
                "GeneratorConfig.low_quality_score must be within [1, 10], got {}",
                self.low_quality_score
            )));
        }
        Ok(())
    }
}
