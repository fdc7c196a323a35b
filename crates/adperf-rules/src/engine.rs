// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::bid::BidHandler;
use crate::budget::BudgetHandler;
use crate::config::GeneratorConfig;
use crate::creative::AdCreativeHandler;
use crate::keyword::KeywordHandler;
use crate::negative::NegativeKeywordHandler;
use crate::strategy::BiddingStrategyHandler;
use crate::types::CandidateRecommendation;
use adperf_core::{
    AdperfError, CampaignSettings, KeywordPerformance, MetricKind, SearchTermPerformance,
    safe_ratio,
};
use adperf_stats::{PerformanceAnalysis, TrendAnalysis};

/// Rule-table categories the generator dispatches over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecommendationCategory {
    Budget,
    Keyword,
    NegativeKeyword,
    Bid,
    BiddingStrategy,
    AdCreative,
}

impl RecommendationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Keyword => "keyword",
            Self::NegativeKeyword => "negative_keyword",
            Self::Bid => "bid",
            Self::BiddingStrategy => "bidding_strategy",
            Self::AdCreative => "ad_creative",
        }
    }
}

/// Everything a category handler may key on.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub analysis: &'a PerformanceAnalysis,
    pub settings: &'a CampaignSettings,
    pub keywords: &'a [KeywordPerformance],
    pub search_terms: &'a [SearchTermPerformance],
    pub config: &'a GeneratorConfig,
}

impl RuleContext<'_> {
    /// Total window spend, reconstructed from the cost interval report.
    pub fn window_cost(&self) -> f64 {
        self.analysis
            .confidence_interval(MetricKind::Cost)
            .map_or(0.0, |ci| ci.mean * ci.sample_size as f64)
    }

    /// Total window conversions.
    pub fn window_conversions(&self) -> f64 {
        self.analysis
            .confidence_interval(MetricKind::Conversions)
            .map_or(0.0, |ci| ci.mean * ci.sample_size as f64)
    }

    pub fn cpa_trend(&self) -> Option<&TrendAnalysis> {
        self.analysis.trend(MetricKind::CostPerConversion)
    }

    pub fn conversions_trend(&self) -> Option<&TrendAnalysis> {
        self.analysis.trend(MetricKind::Conversions)
    }

    /// `amount` as a percentage of the window's total spend.
    pub fn cost_share_pct(&self, amount: f64) -> f64 {
        safe_ratio(amount * 100.0, self.window_cost())
    }
}

/// One recommendation category: inspects the context, emits candidates.
///
/// New categories are added by registering a handler, not by editing a
/// dispatch switch.
pub trait CategoryHandler: Send + Sync {
    fn category(&self) -> RecommendationCategory;
    fn generate(&self, ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation>;
}

/// Table-driven recommendation generator.
pub struct Generator {
    config: GeneratorConfig,
    handlers: Vec<Box<dyn CategoryHandler>>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Generator {
    /// Generator with the default handler registry (budget, keyword,
    /// negative keyword, bid, bidding strategy, ad creative).
    pub fn new(config: GeneratorConfig) -> Result<Self, AdperfError> {
        config.validate()?;
        Ok(Self {
            config,
            handlers: vec![
                Box::new(BudgetHandler),
                Box::new(KeywordHandler),
                Box::new(NegativeKeywordHandler),
                Box::new(BidHandler),
                Box::new(BiddingStrategyHandler),
                Box::new(AdCreativeHandler),
            ],
        })
    }

    /// Registers an additional category handler. A handler for an existing
    /// category runs after the built-in one.
    pub fn register(&mut self, handler: Box<dyn CategoryHandler>) {
        self.handlers.push(handler);
    }

    /// Registered categories, in dispatch order.
    pub fn categories(&self) -> Vec<RecommendationCategory> {
        self.handlers.iter().map(|h| h.category()).collect()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs every registered handler over the analysis. Handlers whose
    /// required configuration is absent (no budget, no target CPA) emit
    /// nothing; an empty ad-creative result means "not yet supported".
    pub fn generate(
        &self,
        analysis: &PerformanceAnalysis,
        settings: &CampaignSettings,
        keywords: &[KeywordPerformance],
        search_terms: &[SearchTermPerformance],
    ) -> Vec<CandidateRecommendation> {
        let ctx = RuleContext {
            analysis,
            settings,
            keywords,
            search_terms,
            config: &self.config,
        };

        self.handlers
            .iter()
            .flat_map(|handler| handler.generate(&ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Generator, RecommendationCategory};
    use crate::config::GeneratorConfig;

    #[test]
    fn default_registry_covers_every_category() {
        let generator = Generator::new(GeneratorConfig::default()).expect("generator");
        let categories = generator.categories();
        for expected in [
            RecommendationCategory::Budget,
            RecommendationCategory::Keyword,
            RecommendationCategory::NegativeKeyword,
            RecommendationCategory::Bid,
            RecommendationCategory::BiddingStrategy,
            RecommendationCategory::AdCreative,
        ] {
            assert!(
                categories.contains(&expected),
                "missing category {expected:?}"
            );
        }
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = GeneratorConfig {
            min_keyword_spend: -1.0,
            ..GeneratorConfig::default()
        };
        let err = Generator::new(cfg).expect_err("negative spend floor must fail");
        assert!(err.to_string().contains("min_keyword_spend"));
    }
}
