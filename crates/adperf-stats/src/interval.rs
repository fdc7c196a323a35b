// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::descriptive::{mean, sample_variance};
use adperf_core::MetricKind;

/// Critical value for samples larger than 30.
const Z_LARGE_SAMPLE: f64 = 1.96;
/// t-style critical value used for samples of 30 or fewer.
const Z_SMALL_SAMPLE: f64 = 2.042;

/// 95% confidence interval for a metric's window mean.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceInterval {
    pub metric: MetricKind,
    pub mean: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub standard_error: f64,
    pub confidence_level: f64,
    pub sample_size: usize,
}

/// `mean ± z * (std / sqrt(n))`, with z = 1.96 for n > 30 and 2.042
/// otherwise. Returns None for an empty series; a single point collapses to
/// a degenerate interval at the mean.
pub fn confidence_interval(metric: MetricKind, series: &[f64]) -> Option<ConfidenceInterval> {
    if series.is_empty() {
        return None;
    }
    let n = series.len();
    let m = mean(series);
    let std = sample_variance(series).sqrt();
    let standard_error = std / (n as f64).sqrt();
    let z = if n > 30 { Z_LARGE_SAMPLE } else { Z_SMALL_SAMPLE };
    let margin = z * standard_error;

    Some(ConfidenceInterval {
        metric,
        mean: m,
        lower_bound: m - margin,
        upper_bound: m + margin,
        standard_error,
        confidence_level: 0.95,
        sample_size: n,
    })
}
