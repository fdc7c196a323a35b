// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::AnalyzerConfig;
use crate::descriptive::{mean, population_variance};
use adperf_core::{MetricKind, MetricRecord};
use chrono::NaiveDate;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlierSeverity {
    Low,
    Medium,
    High,
}

impl OutlierSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One day flagged as anomalous for one metric.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlierDetection {
    pub date: NaiveDate,
    pub metric: MetricKind,
    pub value: f64,
    pub z_score: f64,
    pub severity: OutlierSeverity,
}

/// Z-scores each day of one metric against the full-window population
/// mean/std. A zero standard deviation yields zero z-scores and therefore no
/// outliers.
pub fn detect_outliers(
    metric: MetricKind,
    records: &[MetricRecord],
    cfg: &AnalyzerConfig,
) -> Vec<OutlierDetection> {
    let series = metric.series_from(records);
    let std = population_variance(&series).sqrt();
    if std == 0.0 {
        return vec![];
    }
    let m = mean(&series);

    records
        .iter()
        .zip(series.iter())
        .filter_map(|(record, value)| {
            let z = (value - m) / std;
            if z.abs() <= cfg.outlier_z_threshold {
                return None;
            }
            let severity = if z.abs() > cfg.severe_outlier_z_threshold {
                OutlierSeverity::High
            } else {
                OutlierSeverity::Medium
            };
            Some(OutlierDetection {
                date: record.date,
                metric,
                value: *value,
                z_score: z,
                severity,
            })
        })
        .collect()
}
