// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::AdperfError;
use crate::metrics::MetricRecord;
use crate::recommendation::{ImplementedRecommendation, RecommendationType};

/// Source of daily metric series, injected into the pipeline.
///
/// Implementations own any I/O, timeout, and retry policy; the pipeline
/// itself is pure computation over what these return.
pub trait MetricsRepository {
    /// Returns the campaign's daily records over the lookback window,
    /// ordered by date ascending. An empty result means the campaign (or its
    /// data) was not found, which the pipeline surfaces as a hard error.
    fn daily_metrics(
        &self,
        campaign_id: &str,
        lookback_days: u32,
    ) -> Result<Vec<MetricRecord>, AdperfError>;
}

/// Query surface over past implemented recommendations, used only for
/// historical validation of new impact estimates.
pub trait RecommendationHistoryRepository {
    /// Returns up to `limit` most recent implemented recommendations of the
    /// given type, newest first.
    fn implemented_for_type(
        &self,
        rec_type: RecommendationType,
        limit: usize,
    ) -> Result<Vec<ImplementedRecommendation>, AdperfError>;
}
