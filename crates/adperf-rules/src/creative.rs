// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::engine::{CategoryHandler, RecommendationCategory, RuleContext};
use crate::types::CandidateRecommendation;

/// Ad-creative recommendations require an ad-level data model this crate
/// does not ingest yet. The handler is registered so the category is visible
/// to callers, but it always emits an empty list; callers must treat that as
/// "not yet supported", not as "no recommendations".
pub struct AdCreativeHandler;

impl CategoryHandler for AdCreativeHandler {
    fn category(&self) -> RecommendationCategory {
        RecommendationCategory::AdCreative
    }

    fn generate(&self, _ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation> {
        vec![]
    }
}
