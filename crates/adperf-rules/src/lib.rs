// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod bid;
pub mod budget;
pub mod config;
pub mod creative;
pub mod engine;
pub mod keyword;
pub mod negative;
pub mod strategy;
pub mod types;

pub use bid::BidHandler;
pub use budget::{BudgetEfficiency, BudgetHandler, classify_budget_efficiency};
pub use config::GeneratorConfig;
pub use creative::AdCreativeHandler;
pub use engine::{CategoryHandler, Generator, RecommendationCategory, RuleContext};
pub use keyword::{KeywordHandler, KeywordRule, KeywordRuleInputs, keyword_rules};
pub use negative::{
    NegativeKeywordHandler, SearchTermRule, SearchTermRuleInputs, search_term_rules,
};
pub use strategy::BiddingStrategyHandler;
pub use types::{CandidateRecommendation, SuggestedChange};

/// Recommendation rule-table namespace.
pub fn crate_name() -> &'static str {
    let _ = (adperf_core::crate_name(), adperf_stats::crate_name());
    "adperf-rules"
}
