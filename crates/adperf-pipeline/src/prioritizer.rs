// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::pipeline::RankedRecommendation;

/// Final ordering for one campaign's recommendations: priority tier first
/// (critical before high before medium before low), then confidence
/// descending. The sort is stable, so equal keys keep their generation
/// order and re-sorting an already sorted list is a no-op.
pub fn prioritize(mut items: Vec<RankedRecommendation>) -> Vec<RankedRecommendation> {
    items.sort_by(|a, b| {
        a.candidate
            .priority
            .rank()
            .cmp(&b.candidate.priority.rank())
            .then_with(|| {
                b.candidate
                    .confidence_score
                    .total_cmp(&a.candidate.confidence_score)
            })
    });
    items
}
