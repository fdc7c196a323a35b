// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::AnalyzerConfig;

/// Coverage of the requested lookback window.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataQuality {
    pub has_sufficient_data: bool,
    pub missing_days: usize,
    /// `days_analyzed / expected_days`, clamped to [0, 1].
    pub data_completeness: f64,
}

pub fn assess_data_quality(
    days_analyzed: usize,
    expected_days: usize,
    cfg: &AnalyzerConfig,
) -> DataQuality {
    let data_completeness = if expected_days == 0 {
        0.0
    } else {
        (days_analyzed as f64 / expected_days as f64).clamp(0.0, 1.0)
    };
    let missing_days = expected_days.saturating_sub(days_analyzed);
    let has_sufficient_data = days_analyzed >= cfg.min_days_for_sufficiency
        && data_completeness >= cfg.min_completeness;

    DataQuality {
        has_sufficient_data,
        missing_days,
        data_completeness,
    }
}
