// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::AdperfError;
use chrono::NaiveDate;

/// Division guarded to 0.0 when the denominator is zero.
///
/// Every derived ratio in the data model goes through this guard so that a
/// day with no impressions, clicks, or conversions reads as 0 rather than
/// NaN/inf.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// One day of raw campaign performance.
///
/// Ratios (CTR, CPC, CPA, ROAS) are derived on demand and never stored, so
/// they cannot drift out of sync with the raw counts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricRecord {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub cost: f64,
    pub conversions: f64,
    pub conversion_value: f64,
}

impl MetricRecord {
    /// Constructs a validated record: monetary and conversion fields must be
    /// finite and non-negative.
    pub fn new(
        date: NaiveDate,
        impressions: u64,
        clicks: u64,
        cost: f64,
        conversions: f64,
        conversion_value: f64,
    ) -> Result<Self, AdperfError> {
        for (name, value) in [
            ("cost", cost),
            ("conversions", conversions),
            ("conversion_value", conversion_value),
        ] {
            if !value.is_finite() {
                return Err(AdperfError::invalid_input(format!(
                    "MetricRecord.{name} must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(AdperfError::invalid_input(format!(
                    "MetricRecord.{name} must be >= 0, got {value}"
                )));
            }
        }

        Ok(Self {
            date,
            impressions,
            clicks,
            cost,
            conversions,
            conversion_value,
        })
    }

    /// Click-through rate: clicks / impressions.
    pub fn ctr(&self) -> f64 {
        safe_ratio(self.clicks as f64, self.impressions as f64)
    }

    /// Cost per click.
    pub fn cpc(&self) -> f64 {
        safe_ratio(self.cost, self.clicks as f64)
    }

    /// Cost per conversion (CPA).
    pub fn cost_per_conversion(&self) -> f64 {
        safe_ratio(self.cost, self.conversions)
    }

    /// Return on ad spend: conversion value / cost.
    pub fn roas(&self) -> f64 {
        safe_ratio(self.conversion_value, self.cost)
    }

    /// Conversions / clicks.
    pub fn conversion_rate(&self) -> f64 {
        safe_ratio(self.conversions, self.clicks as f64)
    }
}

/// The daily series the analyzer walks, raw counts and derived ratios alike.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKind {
    Cost,
    Clicks,
    Impressions,
    Conversions,
    ConversionValue,
    Ctr,
    Cpc,
    CostPerConversion,
    Roas,
}

impl MetricKind {
    pub const ALL: [MetricKind; 9] = [
        MetricKind::Cost,
        MetricKind::Clicks,
        MetricKind::Impressions,
        MetricKind::Conversions,
        MetricKind::ConversionValue,
        MetricKind::Ctr,
        MetricKind::Cpc,
        MetricKind::CostPerConversion,
        MetricKind::Roas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Clicks => "clicks",
            Self::Impressions => "impressions",
            Self::Conversions => "conversions",
            Self::ConversionValue => "conversion_value",
            Self::Ctr => "ctr",
            Self::Cpc => "cpc",
            Self::CostPerConversion => "cost_per_conversion",
            Self::Roas => "roas",
        }
    }

    /// Extracts this metric's value from one daily record.
    pub fn value_of(self, record: &MetricRecord) -> f64 {
        match self {
            Self::Cost => record.cost,
            Self::Clicks => record.clicks as f64,
            Self::Impressions => record.impressions as f64,
            Self::Conversions => record.conversions,
            Self::ConversionValue => record.conversion_value,
            Self::Ctr => record.ctr(),
            Self::Cpc => record.cpc(),
            Self::CostPerConversion => record.cost_per_conversion(),
            Self::Roas => record.roas(),
        }
    }

    /// Extracts the per-day series for this metric, in record order.
    pub fn series_from(self, records: &[MetricRecord]) -> Vec<f64> {
        records.iter().map(|record| self.value_of(record)).collect()
    }

    /// True for spend-side metrics where a decrease is an improvement.
    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::Cost | Self::Cpc | Self::CostPerConversion)
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricKind, MetricRecord, safe_ratio};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).expect("valid test date")
    }

    fn record(cost: f64, clicks: u64, impressions: u64, conversions: f64) -> MetricRecord {
        MetricRecord::new(day(1), impressions, clicks, cost, conversions, conversions * 80.0)
            .expect("valid test record")
    }

    #[test]
    fn safe_ratio_guards_zero_denominator() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(safe_ratio(5.0, 2.0), 2.5);
    }

    #[test]
    fn derived_ratios_are_zero_on_empty_day() {
        let empty = record(0.0, 0, 0, 0.0);
        assert_eq!(empty.ctr(), 0.0);
        assert_eq!(empty.cpc(), 0.0);
        assert_eq!(empty.cost_per_conversion(), 0.0);
        assert_eq!(empty.roas(), 0.0);
        assert_eq!(empty.conversion_rate(), 0.0);
    }

    #[test]
    fn derived_ratios_match_hand_computation() {
        let r = record(120.0, 60, 3000, 3.0);
        assert!((r.ctr() - 0.02).abs() < 1e-12);
        assert!((r.cpc() - 2.0).abs() < 1e-12);
        assert!((r.cost_per_conversion() - 40.0).abs() < 1e-12);
        assert!((r.roas() - 2.0).abs() < 1e-12);
        assert!((r.conversion_rate() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_negative_and_non_finite_values() {
        let err = MetricRecord::new(day(1), 10, 5, -1.0, 0.0, 0.0).expect_err("negative cost");
        assert!(err.to_string().contains("cost must be >= 0"));

        let err = MetricRecord::new(day(1), 10, 5, f64::NAN, 0.0, 0.0).expect_err("nan cost");
        assert!(err.to_string().contains("cost must be finite"));
    }

    #[test]
    fn series_from_preserves_record_order() {
        let records = vec![record(10.0, 5, 100, 1.0), record(20.0, 8, 150, 0.0)];
        assert_eq!(MetricKind::Cost.series_from(&records), vec![10.0, 20.0]);
        assert_eq!(MetricKind::Clicks.series_from(&records), vec![5.0, 8.0]);
        assert_eq!(
            MetricKind::CostPerConversion.series_from(&records),
            vec![10.0, 0.0]
        );
    }

    #[test]
    fn lower_is_better_covers_spend_side_metrics() {
        assert!(MetricKind::Cost.lower_is_better());
        assert!(MetricKind::CostPerConversion.lower_is_better());
        assert!(!MetricKind::Conversions.lower_is_better());
        assert!(!MetricKind::Roas.lower_is_better());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn metric_record_serde_roundtrip() {
        let r = record(33.25, 12, 400, 2.0);
        let encoded = serde_json::to_string(&r).expect("record should serialize");
        let decoded: MetricRecord = serde_json::from_str(&encoded).expect("record should parse");
        assert_eq!(decoded, r);
    }
}
