// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::GeneratorConfig;
use crate::engine::{CategoryHandler, RecommendationCategory, RuleContext};
use crate::types::{CandidateRecommendation, SuggestedChange};
use adperf_core::{MetricKind, Priority, RecommendationType, SearchTermPerformance, safe_ratio};

const WASTED_HIGH_CONFIDENCE: f64 = 0.90;
const WASTED_MEDIUM_CONFIDENCE: f64 = 0.80;
const CPA_BLOWOUT_CONFIDENCE: f64 = 0.75;
const LOW_RATE_CONFIDENCE: f64 = 0.70;
const EARLY_WASTE_CONFIDENCE: f64 = 0.60;

/// Fraction of a term's spend assumed saved when it converts but blows past
/// the CPA target.
const CPA_BLOWOUT_SAVINGS_FRACTION: f64 = 0.8;
/// Fraction assumed saved for a converting term with a weak conversion rate.
const LOW_RATE_SAVINGS_FRACTION: f64 = 0.5;

/// Inputs shared by every search-term rule evaluation.
pub struct SearchTermRuleInputs<'a> {
    pub campaign_id: &'a str,
    pub target_cpa: Option<f64>,
    pub window_cost: f64,
    pub config: &'a GeneratorConfig,
}

/// One entry of the search-term rule ladder, evaluated first-match per term.
pub struct SearchTermRule {
    pub name: &'static str,
    pub applies: fn(&SearchTermPerformance, &SearchTermRuleInputs<'_>) -> bool,
    pub build: fn(&SearchTermPerformance, &SearchTermRuleInputs<'_>) -> CandidateRecommendation,
}

/// The ordered negative-keyword rule ladder.
pub fn search_term_rules() -> Vec<SearchTermRule> {
    vec![
        SearchTermRule {
            name: "wasted_high_spend",
            applies: |term, inputs| {
                term.cost >= inputs.config.negative_high_spend && term.conversions == 0.0
            },
            build: |term, inputs| {
                build_negative(
                    term,
                    inputs,
                    term.cost,
                    Priority::High,
                    WASTED_HIGH_CONFIDENCE,
                    format!(
                        "${:.2} spent with 0 conversions is above the ${:.2} exclusion threshold.",
                        term.cost, inputs.config.negative_high_spend
                    ),
                )
            },
        },
        SearchTermRule {
            name: "wasted_medium_spend",
            applies: |term, inputs| {
                term.cost >= inputs.config.negative_min_spend
                    && term.cost < inputs.config.negative_high_spend
                    && term.conversions == 0.0
            },
            build: |term, inputs| {
                build_negative(
                    term,
                    inputs,
                    term.cost,
                    Priority::Medium,
                    WASTED_MEDIUM_CONFIDENCE,
                    format!(
                        "${:.2} spent with 0 conversions; below the high-priority threshold but still pure waste.",
                        term.cost
                    ),
                )
            },
        },
        SearchTermRule {
            name: "cpa_blowout",
            applies: |term, inputs| {
                term.conversions > 0.0
                    && term.cost >= inputs.config.negative_min_spend
                    && inputs.target_cpa.is_some_and(|target| {
                        term.cpa() > inputs.config.pause_cpa_multiple * target
                    })
            },
            build: |term, inputs| {
                build_negative(
                    term,
                    inputs,
                    CPA_BLOWOUT_SAVINGS_FRACTION * term.cost,
                    Priority::High,
                    CPA_BLOWOUT_CONFIDENCE,
                    format!(
                        "Cost per conversion of ${:.2} is more than {:.0}x the ${:.2} target CPA.",
                        term.cpa(),
                        inputs.config.pause_cpa_multiple,
                        inputs.target_cpa.unwrap_or_default()
                    ),
                )
            },
        },
        SearchTermRule {
            name: "low_conversion_rate",
            applies: |term, inputs| {
                term.conversions > 0.0
                    && term.cost >= inputs.config.negative_min_spend
                    && term.conversion_rate() < inputs.config.min_conversion_rate
            },
            build: |term, inputs| {
                build_negative(
                    term,
                    inputs,
                    LOW_RATE_SAVINGS_FRACTION * term.cost,
                    Priority::Medium,
                    LOW_RATE_CONFIDENCE,
                    format!(
                        "Conversion rate of {:.1}% is below the {:.1}% floor on ${:.2} of spend.",
                        term.conversion_rate() * 100.0,
                        inputs.config.min_conversion_rate * 100.0,
                        term.cost
                    ),
                )
            },
        },
        SearchTermRule {
            name: "early_waste",
            applies: |term, inputs| {
                term.cost < inputs.config.negative_min_spend
                    && term.conversions == 0.0
                    && term.clicks >= inputs.config.negative_min_clicks
            },
            build: |term, inputs| {
                build_negative(
                    term,
                    inputs,
                    term.cost,
                    Priority::Low,
                    EARLY_WASTE_CONFIDENCE,
                    format!(
                        "{} clicks and ${:.2} spent with 0 conversions; early signal of a poor match.",
                        term.clicks, term.cost
                    ),
                )
            },
        },
    ]
}

/// Search-term rule table: first matching rule per term.
pub struct NegativeKeywordHandler;

impl CategoryHandler for NegativeKeywordHandler {
    fn category(&self) -> RecommendationCategory {
        RecommendationCategory::NegativeKeyword
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation> {
        let rules = search_term_rules();
        let inputs = SearchTermRuleInputs {
            campaign_id: &ctx.analysis.campaign_id,
            target_cpa: ctx.settings.target_cpa,
            window_cost: ctx.window_cost(),
            config: ctx.config,
        };

        ctx.search_terms
            .iter()
            .filter_map(|term| {
                rules
                    .iter()
                    .find(|rule| (rule.applies)(term, &inputs))
                    .map(|rule| (rule.build)(term, &inputs))
            })
            .collect()
    }
}

fn build_negative(
    term: &SearchTermPerformance,
    inputs: &SearchTermRuleInputs<'_>,
    estimated_savings: f64,
    priority: Priority,
    confidence: f64,
    reasoning: String,
) -> CandidateRecommendation {
    CandidateRecommendation {
        rec_type: RecommendationType::NegativeKeyword,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Add negative keyword \"{}\"", term.term),
        description: format!(
            "Exclude search term \"{}\" to save an estimated ${:.2} per window.",
            term.term, estimated_savings
        ),
        reasoning,
        expected_impact: format!("save approximately ${estimated_savings:.2} per window"),
        impact_metric: MetricKind::Cost,
        impact_value: -safe_ratio(estimated_savings * 100.0, inputs.window_cost),
        confidence_score: confidence,
        priority,
        suggested_change: SuggestedChange::NegativeKeyword {
            term: term.term.clone(),
            estimated_savings,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::NegativeKeywordHandler;
    use crate::config::GeneratorConfig;
    use crate::engine::{CategoryHandler, RuleContext};
    use crate::types::{CandidateRecommendation, SuggestedChange};
    use adperf_core::{
        BiddingStrategy, CampaignSettings, MetricRecord, Priority, SearchTermPerformance,
    };
    use adperf_stats::{AnalyzerConfig, PerformanceAnalysis, analyze};
    use chrono::{Days, NaiveDate};

    fn steady_analysis() -> PerformanceAnalysis {
        let records: Vec<MetricRecord> = (0..30)
            .map(|d| MetricRecord {
                date: NaiveDate::from_ymd_opt(2026, 1, 1)
                    .expect("valid date")
                    .checked_add_days(Days::new(d as u64))
                    .expect("valid offset"),
                impressions: 2000,
                clicks: 100,
                cost: 100.0,
                conversions: 2.0,
                conversion_value: 180.0,
            })
            .collect();
        analyze("cmp-1", &records, 30, &AnalyzerConfig::default()).expect("analysis")
    }

    fn term(cost: f64, clicks: u64, conversions: f64) -> SearchTermPerformance {
        SearchTermPerformance {
            term: "free shoes".to_string(),
            cost,
            clicks,
            impressions: clicks * 30,
            conversions,
        }
    }

    fn run(terms: &[SearchTermPerformance]) -> Vec<CandidateRecommendation> {
        let analysis = steady_analysis();
        let cfg = GeneratorConfig::default();
        let settings = CampaignSettings {
            campaign_id: "cmp-1".to_string(),
            budget: Some(100.0),
            target_cpa: Some(50.0),
            target_roas: None,
            bidding_strategy: BiddingStrategy::ManualCpc,
        };
        let ctx = RuleContext {
            analysis: &analysis,
            settings: &settings,
            keywords: &[],
            search_terms: terms,
            config: &cfg,
        };
        NegativeKeywordHandler.generate(&ctx)
    }

    fn savings_of(rec: &CandidateRecommendation) -> f64 {
        match &rec.suggested_change {
            SuggestedChange::NegativeKeyword {
                estimated_savings, ..
            } => *estimated_savings,
            other => panic!("expected negative keyword change, got {other:?}"),
        }
    }

    #[test]
    fn high_spend_zero_conversion_term_saves_full_cost() {
        // $208 with no conversions: high priority, full-cost savings.
        let recs = run(&[term(208.0, 80, 0.0)]);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(savings_of(rec), 208.0);
        assert!(rec.expected_impact.contains("$208.00"));
    }

    #[test]
    fn medium_spend_zero_conversion_term_is_medium_priority() {
        let recs = run(&[term(35.0, 15, 0.0)]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(savings_of(&recs[0]), 35.0);
    }

    #[test]
    fn cpa_blowout_term_saves_eighty_percent_of_cost() {
        // $150 over 1 conversion at a $50 target: CPA $150 > 2x target.
        let recs = run(&[term(150.0, 60, 1.0)]);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::High);
        assert!((savings_of(rec) - 120.0).abs() < 1e-9);
        assert!(rec.reasoning.contains("$150.00"));
    }

    #[test]
    fn weak_conversion_rate_term_saves_half_of_cost() {
        // 2 conversions from 250 clicks: 0.8% rate on $40 of spend.
        let recs = run(&[term(40.0, 250, 2.0)]);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert!((savings_of(rec) - 20.0).abs() < 1e-9);
        assert!(rec.reasoning.contains("0.8%"));
    }

    #[test]
    fn low_spend_term_needs_enough_clicks() {
        let too_few = run(&[term(12.0, 3, 0.0)]);
        assert!(too_few.is_empty());

        let enough = run(&[term(12.0, 6, 0.0)]);
        assert_eq!(enough.len(), 1);
        assert_eq!(enough[0].priority, Priority::Low);
        assert_eq!(savings_of(&enough[0]), 12.0);
    }

    #[test]
    fn converting_cheap_term_is_left_alone() {
        let recs = run(&[term(15.0, 20, 1.0)]);
        assert!(recs.is_empty());
    }
}
