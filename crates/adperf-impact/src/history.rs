// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::EstimatorConfig;
use adperf_core::{AdperfError, RecommendationHistoryRepository, RecommendationType};

const HIGH_RATE: f64 = 0.7;
const HIGH_MIN_SAMPLES: usize = 20;
const MEDIUM_RATE: f64 = 0.5;
const MEDIUM_MIN_SAMPLES: usize = 10;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationConfidence {
    High,
    Medium,
    Low,
}

impl ValidationConfidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// How similar recommendations of this type have actually performed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoricalValidation {
    /// Implemented recommendations with a measured outcome.
    pub sample_size: usize,
    /// Share of outcomes within tolerance of the currently expected impact.
    pub success_rate: f64,
    pub confidence: ValidationConfidence,
}

/// Checks the currently expected impact against up to `history_limit` past
/// implemented recommendations of the same type.
///
/// A past outcome counts as a success when its measured impact lands within
/// the relative tolerance of `expected_pct`. Validation is only reported
/// once at least `history_min_samples` measured outcomes exist.
pub fn validate_against_history(
    repository: &dyn RecommendationHistoryRepository,
    rec_type: RecommendationType,
    expected_pct: f64,
    cfg: &EstimatorConfig,
) -> Result<Option<HistoricalValidation>, AdperfError> {
    let records = repository.implemented_for_type(rec_type, cfg.history_limit)?;
    let measured: Vec<f64> = records
        .iter()
        .filter_map(|record| record.actual_impact_value)
        .collect();

    if measured.len() < cfg.history_min_samples {
        return Ok(None);
    }

    let tolerance = cfg.history_success_tolerance * expected_pct.abs().max(f64::EPSILON);
    let successes = measured
        .iter()
        .filter(|actual| (*actual - expected_pct).abs() <= tolerance)
        .count();
    let sample_size = measured.len();
    let success_rate = successes as f64 / sample_size as f64;

    let confidence = if success_rate > HIGH_RATE && sample_size > HIGH_MIN_SAMPLES {
        ValidationConfidence::High
    } else if success_rate > MEDIUM_RATE && sample_size > MEDIUM_MIN_SAMPLES {
        ValidationConfidence::Medium
    } else {
        ValidationConfidence::Low
    };

    Ok(Some(HistoricalValidation {
        sample_size,
        success_rate,
        confidence,
    }))
}
