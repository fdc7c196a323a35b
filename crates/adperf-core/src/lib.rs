// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod campaign;
pub mod error;
pub mod metrics;
pub mod recommendation;
pub mod repository;

pub use campaign::{
    BiddingStrategy, CampaignSettings, KeywordPerformance, SearchTermPerformance,
};
pub use error::AdperfError;
pub use metrics::{MetricKind, MetricRecord, safe_ratio};
pub use recommendation::{ImplementedRecommendation, Priority, RecommendationType};
pub use repository::{MetricsRepository, RecommendationHistoryRepository};

/// Core shared types and traits for adperf.
pub fn crate_name() -> &'static str {
    "adperf-core"
}
