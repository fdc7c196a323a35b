// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::AnalyzerConfig;
use crate::descriptive::{mean, sample_variance};
use adperf_core::MetricKind;

/// Welch's t-test between the historical and recent halves of the window.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SignificanceTestResult {
    pub metric: MetricKind,
    pub p_value: f64,
    pub is_significant: bool,
    /// `1 - p_value`.
    pub confidence_level: f64,
    pub interpretation: String,
}

/// Splits the window into halves (first = historical, second = recent; odd
/// lengths give the extra point to the recent half) and tests whether the
/// halves' means differ.
///
/// Fewer than two points in either half is a neutral result: `p = 1`, not
/// significant. A zero pooled standard error resolves to `p = 1` when the
/// means agree and `p = 0` otherwise.
pub fn half_window_significance(
    metric: MetricKind,
    series: &[f64],
    cfg: &AnalyzerConfig,
) -> SignificanceTestResult {
    let split = series.len() / 2;
    let historical = &series[..split];
    let recent = &series[split..];

    let p_value = if historical.len() < 2 || recent.len() < 2 {
        1.0
    } else {
        welch_p_value(historical, recent)
    };

    let is_significant = p_value < cfg.significance_alpha;
    let interpretation = if is_significant {
        format!(
            "{} shifted significantly between window halves (p={:.3})",
            metric.as_str(),
            p_value
        )
    } else {
        format!(
            "no significant change in {} between window halves (p={:.3})",
            metric.as_str(),
            p_value
        )
    };

    SignificanceTestResult {
        metric,
        p_value,
        is_significant,
        confidence_level: 1.0 - p_value,
        interpretation,
    }
}

fn welch_p_value(historical: &[f64], recent: &[f64]) -> f64 {
    let n1 = historical.len() as f64;
    let n2 = recent.len() as f64;
    let m1 = mean(historical);
    let m2 = mean(recent);
    let v1 = sample_variance(historical);
    let v2 = sample_variance(recent);

    let se_sq = v1 / n1 + v2 / n2;
    if se_sq <= 0.0 {
        return if (m2 - m1).abs() <= f64::EPSILON {
            1.0
        } else {
            0.0
        };
    }

    let t = (m2 - m1) / se_sq.sqrt();
    let df_denominator =
        (v1 / n1).powi(2) / (n1 - 1.0) + (v2 / n2).powi(2) / (n2 - 1.0);
    let df = if df_denominator > 0.0 {
        se_sq.powi(2) / df_denominator
    } else {
        n1 + n2 - 2.0
    };

    two_sided_p_value(t, df)
}

/// Closed-form approximation to the two-sided t-distribution p-value.
///
/// A moment-matched normal shrink of the t statistic,
/// `z = t * (1 - 1/(4*df)) / sqrt(1 + t^2/(2*df))`, is evaluated against the
/// Abramowitz-Stegun 7.1.26 rational approximation of the normal CDF.
/// Absolute error stays below ~5e-3 for df >= 5 and degrades for smaller df;
/// this is an approximation, not an incomplete-beta evaluation.
fn two_sided_p_value(t: f64, df: f64) -> f64 {
    if !t.is_finite() || df <= 0.0 {
        return 1.0;
    }
    let z = t * (1.0 - 1.0 / (4.0 * df)) / (1.0 + (t * t) / (2.0 * df)).sqrt();
    let p = 2.0 * (1.0 - standard_normal_cdf(z.abs()));
    p.clamp(0.0, 1.0)
}

/// Standard normal CDF via the Abramowitz-Stegun 7.1.26 erf approximation
/// (absolute error below 1.5e-7).
fn standard_normal_cdf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + 0.327_591_1 * x);
    let poly = ((((1.061_405_429 * t - 1.453_152_027) * t) + 1.421_413_741) * t
        - 0.284_496_736)
        * t
        + 0.254_829_592;
    let erf = 1.0 - poly * t * (-x * x).exp();

    0.5 * (1.0 + sign * erf)
}
