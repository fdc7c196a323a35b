// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use adperf_core::AdperfError;

const DEFAULT_RISK_LOW_THRESHOLD: f64 = 0.2;
const DEFAULT_RISK_MEDIUM_THRESHOLD: f64 = 0.5;
const DEFAULT_IMPACT_MARGIN_Z: f64 = 1.96;
const DEFAULT_PROJECTION_DAYS: f64 = 30.0;
const DEFAULT_COMPLEXITY_COST_LOW: f64 = 100.0;
const DEFAULT_COMPLEXITY_COST_MEDIUM: f64 = 300.0;
const DEFAULT_COMPLEXITY_COST_HIGH: f64 = 500.0;
const DEFAULT_HISTORY_LIMIT: usize = 50;
const DEFAULT_HISTORY_MIN_SAMPLES: usize = 5;
const DEFAULT_HISTORY_SUCCESS_TOLERANCE: f64 = 0.2;

/// Thresholds and fixed costs for the impact estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorConfig {
    /// Relative uncertainty below which an estimate is low risk.
    pub risk_low_threshold: f64,
    /// Relative uncertainty below which an estimate is medium risk.
    pub risk_medium_threshold: f64,
    /// Critical value applied to the impact standard error.
    pub impact_margin_z: f64,
    /// Days used to project a daily change to a monthly figure.
    pub projection_days: f64,
    pub complexity_cost_low: f64,
    pub complexity_cost_medium: f64,
    pub complexity_cost_high: f64,
    /// Most recent implemented recommendations consulted per type.
    pub history_limit: usize,
    /// Minimum measured samples before validation is reported at all.
    pub history_min_samples: usize,
    /// Relative tolerance for counting a past outcome as a success.
    pub history_success_tolerance: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            risk_low_threshold: DEFAULT_RISK_LOW_THRESHOLD,
            risk_medium_threshold: DEFAULT_RISK_MEDIUM_THRESHOLD,
            impact_margin_z: DEFAULT_IMPACT_MARGIN_Z,
            projection_days: DEFAULT_PROJECTION_DAYS,
            complexity_cost_low: DEFAULT_COMPLEXITY_COST_LOW,
            complexity_cost_medium: DEFAULT_COMPLEXITY_COST_MEDIUM,
            complexity_cost_high: DEFAULT_COMPLEXITY_COST_HIGH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_min_samples: DEFAULT_HISTORY_MIN_SAMPLES,
            history_success_tolerance: DEFAULT_HISTORY_SUCCESS_TOLERANCE,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<(), AdperfError> {
        for (name, value) in [
            ("risk_low_threshold", self.risk_low_threshold),
            ("risk_medium_threshold", self.risk_medium_threshold),
            ("impact_margin_z", self.impact_margin_z),
            ("projection_days", self.projection_days),
            ("complexity_cost_low", self.complexity_cost_low),
            ("complexity_cost_medium", self.complexity_cost_medium),
            ("complexity_cost_high", self.complexity_cost_high),
            (
                "history_success_tolerance",
                self.history_success_tolerance,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AdperfError::invalid_input(format!(
                    "EstimatorConfig.{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.risk_low_threshold >= self.risk_medium_threshold {
            return Err(AdperfError::invalid_input(format!(
                "EstimatorConfig.risk_low_threshold ({}) must be < risk_medium_threshold ({})",
                self.risk_low_threshold, self.risk_medium_threshold
            )));
        }
        if self.history_min_samples == 0 || self.history_limit < self.history_min_samples {
            return Err(AdperfError::invalid_input(format!(
                "EstimatorConfig history limits are inconsistent: limit={}, min_samples={}",
                self.history_limit, self.history_min_samples
            )));
        }
        Ok(())
    }
}
