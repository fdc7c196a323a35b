// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::GeneratorConfig;
use crate::engine::{CategoryHandler, RecommendationCategory, RuleContext};
use crate::types::{CandidateRecommendation, SuggestedChange};
use adperf_core::{KeywordPerformance, MetricKind, Priority, RecommendationType, safe_ratio};

const PAUSE_UNCONVERTING_CONFIDENCE: f64 = 0.90;
const PAUSE_CPA_CONFIDENCE: f64 = 0.85;
const PAUSE_LOW_QUALITY_CONFIDENCE: f64 = 0.70;
const SCALE_STAR_CONFIDENCE: f64 = 0.80;
const SCALE_STEADY_CONFIDENCE: f64 = 0.75;
const OPTIMIZE_CPA_CONFIDENCE: f64 = 0.65;
const OPTIMIZE_CTR_CONFIDENCE: f64 = 0.60;

/// Inputs shared by every keyword rule evaluation.
pub struct KeywordRuleInputs<'a> {
    pub campaign_id: &'a str,
    pub target_cpa: Option<f64>,
    /// Total window spend; keyword-level impact is expressed as a share of
    /// it (0 when unknown).
    pub window_cost: f64,
    pub config: &'a GeneratorConfig,
}

/// One entry of the keyword rule ladder: a named predicate plus the builder
/// that fires when it matches. Rules are evaluated in order; the first match
/// wins for each keyword.
pub struct KeywordRule {
    pub name: &'static str,
    pub applies: fn(&KeywordPerformance, &KeywordRuleInputs<'_>) -> bool,
    pub build: fn(&KeywordPerformance, &KeywordRuleInputs<'_>) -> CandidateRecommendation,
}

/// The ordered keyword rule ladder.
pub fn keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule {
            name: "pause_unconverting_spender",
            applies: |kw, inputs| {
                kw.cost >= inputs.config.pause_spend_threshold && kw.conversions == 0.0
            },
            build: build_pause_unconverting,
        },
        KeywordRule {
            name: "pause_cpa_blowout",
            applies: |kw, inputs| {
                kw.conversions > 0.0
                    && inputs
                        .target_cpa
                        .is_some_and(|target| kw.cpa() > inputs.config.pause_cpa_multiple * target)
            },
            build: build_pause_cpa,
        },
        KeywordRule {
            name: "pause_low_quality",
            applies: |kw, inputs| {
                kw.quality_score
                    .is_some_and(|qs| qs < inputs.config.low_quality_score)
                    && (kw.conversions == 0.0
                        || inputs.target_cpa.is_some_and(|target| {
                            kw.cpa() > inputs.config.low_quality_cpa_multiple * target
                        }))
            },
            build: build_pause_low_quality,
        },
        KeywordRule {
            name: "scale_star_performer",
            applies: |kw, inputs| {
                kw.conversions >= inputs.config.scale_min_conversions
                    && inputs
                        .target_cpa
                        .is_some_and(|target| kw.cpa() < inputs.config.scale_cpa_multiple * target)
            },
            build: build_scale_star,
        },
        KeywordRule {
            name: "scale_steady_performer",
            applies: |kw, inputs| {
                kw.conversions >= inputs.config.steady_min_conversions
                    && kw.conversion_rate() >= 2.0 * inputs.config.min_conversion_rate
                    && inputs.target_cpa.is_some_and(|target| kw.cpa() <= target)
            },
            build: build_scale_steady,
        },
        KeywordRule {
            name: "optimize_above_target",
            applies: |kw, inputs| {
                kw.conversions > 0.0
                    && inputs.target_cpa.is_some_and(|target| {
                        kw.cpa() > target
                            && kw.cpa() <= inputs.config.low_quality_cpa_multiple * target
                    })
            },
            build: build_optimize_cpa,
        },
        KeywordRule {
            name: "optimize_low_ctr",
            applies: |kw, inputs| {
                kw.ctr() < inputs.config.low_ctr_threshold && kw.conversions > 0.0
            },
            build: build_optimize_ctr,
        },
    ]
}

/// Keyword rule table: first matching rule per keyword; keywords below the
/// spend floor are skipped as insufficient data.
pub struct KeywordHandler;

impl CategoryHandler for KeywordHandler {
    fn category(&self) -> RecommendationCategory {
        RecommendationCategory::Keyword
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation> {
        let rules = keyword_rules();
        let inputs = KeywordRuleInputs {
            campaign_id: &ctx.analysis.campaign_id,
            target_cpa: ctx.settings.target_cpa,
            window_cost: ctx.window_cost(),
            config: ctx.config,
        };

        ctx.keywords
            .iter()
            .filter(|kw| kw.cost >= ctx.config.min_keyword_spend)
            .filter_map(|kw| {
                rules
                    .iter()
                    .find(|rule| (rule.applies)(kw, &inputs))
                    .map(|rule| (rule.build)(kw, &inputs))
            })
            .collect()
    }
}

fn spend_share_pct(kw: &KeywordPerformance, inputs: &KeywordRuleInputs<'_>) -> f64 {
    safe_ratio(kw.cost * 100.0, inputs.window_cost)
}

fn build_pause_unconverting(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    CandidateRecommendation {
        rec_type: RecommendationType::PauseKeyword,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Pause keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" spent ${:.2} without a single conversion; pause it to stop the waste.",
            kw.text, kw.cost
        ),
        reasoning: format!(
            "${:.2} spent over the window with 0 conversions is above the ${:.2} pause threshold.",
            kw.cost, inputs.config.pause_spend_threshold
        ),
        expected_impact: format!("save ${:.2} per window", kw.cost),
        impact_metric: MetricKind::Cost,
        impact_value: -spend_share_pct(kw, inputs),
        confidence_score: PAUSE_UNCONVERTING_CONFIDENCE,
        priority: Priority::High,
        suggested_change: SuggestedChange::PauseKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
        },
    }
}

fn build_pause_cpa(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    let target = inputs.target_cpa.unwrap_or_default();
    CandidateRecommendation {
        rec_type: RecommendationType::PauseKeyword,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Pause keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" converts at ${:.2} per conversion against a ${:.2} target; pause it until the economics improve.",
            kw.text,
            kw.cpa(),
            target
        ),
        reasoning: format!(
            "Cost per conversion of ${:.2} is more than {:.0}x the ${:.2} target CPA.",
            kw.cpa(),
            inputs.config.pause_cpa_multiple,
            target
        ),
        expected_impact: format!("save up to ${:.2} per window", kw.cost),
        impact_metric: MetricKind::Cost,
        impact_value: -spend_share_pct(kw, inputs),
        confidence_score: PAUSE_CPA_CONFIDENCE,
        priority: Priority::High,
        suggested_change: SuggestedChange::PauseKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
        },
    }
}

fn build_pause_low_quality(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    let quality = kw.quality_score.unwrap_or_default();
    CandidateRecommendation {
        rec_type: RecommendationType::PauseKeyword,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Pause low-quality keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" carries a quality score of {} and is not earning its ${:.2} spend.",
            kw.text, quality, kw.cost
        ),
        reasoning: format!(
            "Quality score {} is below {} and the keyword is either unconverting or above {:.1}x the target CPA.",
            quality, inputs.config.low_quality_score, inputs.config.low_quality_cpa_multiple
        ),
        expected_impact: format!("save up to ${:.2} per window", kw.cost),
        impact_metric: MetricKind::Cost,
        impact_value: -spend_share_pct(kw, inputs),
        confidence_score: PAUSE_LOW_QUALITY_CONFIDENCE,
        priority: Priority::Medium,
        suggested_change: SuggestedChange::PauseKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
        },
    }
}

fn build_scale_star(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    let target = inputs.target_cpa.unwrap_or_default();
    let increase_pct = inputs.config.scale_spend_fraction * 100.0;
    CandidateRecommendation {
        rec_type: RecommendationType::KeywordOptimization,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Scale winning keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" delivers {:.1} conversions at ${:.2} each, far under the ${:.2} target; raise its bids or budget share by {:.1}%.",
            kw.text,
            kw.conversions,
            kw.cpa(),
            target,
            increase_pct
        ),
        reasoning: format!(
            "{:.1} conversions at ${:.2} per conversion is under half the target CPA.",
            kw.conversions,
            kw.cpa()
        ),
        expected_impact: format!("{increase_pct:+.1}% spend on a proven converter"),
        impact_metric: MetricKind::Cost,
        impact_value: inputs.config.scale_spend_fraction * spend_share_pct(kw, inputs),
        confidence_score: SCALE_STAR_CONFIDENCE,
        priority: Priority::High,
        suggested_change: SuggestedChange::ScaleKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
            spend_increase_percentage: increase_pct,
        },
    }
}

fn build_scale_steady(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    let increase_pct = inputs.config.scale_spend_fraction * 100.0;
    CandidateRecommendation {
        rec_type: RecommendationType::KeywordOptimization,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Scale steady keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" converts at {:.1}% of clicks with CPA at or under target; it can absorb {:.1}% more spend.",
            kw.text,
            kw.conversion_rate() * 100.0,
            increase_pct
        ),
        reasoning: format!(
            "{:.1} conversions with a {:.1}% conversion rate (at least twice the {:.1}% floor) and CPA within the ${:.2} target.",
            kw.conversions,
            kw.conversion_rate() * 100.0,
            inputs.config.min_conversion_rate * 100.0,
            inputs.target_cpa.unwrap_or_default()
        ),
        expected_impact: format!("{increase_pct:+.1}% spend on a steady converter"),
        impact_metric: MetricKind::Cost,
        impact_value: inputs.config.scale_spend_fraction * spend_share_pct(kw, inputs),
        confidence_score: SCALE_STEADY_CONFIDENCE,
        priority: Priority::Medium,
        suggested_change: SuggestedChange::ScaleKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
            spend_increase_percentage: increase_pct,
        },
    }
}

fn build_optimize_cpa(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    let target = inputs.target_cpa.unwrap_or_default();
    CandidateRecommendation {
        rec_type: RecommendationType::KeywordOptimization,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Optimize keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" converts at ${:.2} against a ${:.2} target; tighten bids and match types before considering a pause.",
            kw.text,
            kw.cpa(),
            target
        ),
        reasoning: format!(
            "Cost per conversion of ${:.2} sits between the target and {:.1}x the target.",
            kw.cpa(),
            inputs.config.low_quality_cpa_multiple
        ),
        expected_impact: format!(
            "recover roughly ${:.2} per window",
            inputs.config.optimize_savings_fraction * kw.cost
        ),
        impact_metric: MetricKind::Cost,
        impact_value: -inputs.config.optimize_savings_fraction * spend_share_pct(kw, inputs),
        confidence_score: OPTIMIZE_CPA_CONFIDENCE,
        priority: Priority::Medium,
        suggested_change: SuggestedChange::OptimizeKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
            action: "tighten bids and match types".to_string(),
        },
    }
}

fn build_optimize_ctr(
    kw: &KeywordPerformance,
    inputs: &KeywordRuleInputs<'_>,
) -> CandidateRecommendation {
    CandidateRecommendation {
        rec_type: RecommendationType::KeywordOptimization,
        campaign_id: inputs.campaign_id.to_string(),
        title: format!("Refresh creative for keyword \"{}\"", kw.text),
        description: format!(
            "Keyword \"{}\" converts but only {:.1}% of impressions click through; stronger ad copy should lift volume.",
            kw.text,
            kw.ctr() * 100.0
        ),
        reasoning: format!(
            "CTR of {:.1}% is below the {:.1}% floor while the keyword still converts.",
            kw.ctr() * 100.0,
            inputs.config.low_ctr_threshold * 100.0
        ),
        expected_impact: "more clicks at the current conversion rate".to_string(),
        impact_metric: MetricKind::Cost,
        impact_value: -inputs.config.optimize_savings_fraction * spend_share_pct(kw, inputs),
        confidence_score: OPTIMIZE_CTR_CONFIDENCE,
        priority: Priority::Low,
        suggested_change: SuggestedChange::OptimizeKeyword {
            keyword_id: kw.keyword_id.clone(),
            keyword_text: kw.text.clone(),
            action: "refresh ad copy to lift click-through".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::KeywordHandler;
    use crate::config::GeneratorConfig;
    use crate::engine::{CategoryHandler, RuleContext};
    use crate::types::{CandidateRecommendation, SuggestedChange};
    use adperf_core::{
        BiddingStrategy, CampaignSettings, KeywordPerformance, MetricRecord, Priority,
        RecommendationType,
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

    fn keyword(cost: f64, clicks: u64, conversions: f64) -> KeywordPerformance {
        KeywordPerformance {
            keyword_id: "kw-1".to_string(),
            text: "running shoes".to_string(),
            cost,
            clicks,
            impressions: clicks * 40,
            conversions,
            quality_score: Some(7),
        }
    }

    fn run(
        keywords: &[KeywordPerformance],
        target_cpa: Option<f64>,
    ) -> Vec<CandidateRecommendation> {
        let analysis = steady_analysis();
        let cfg = GeneratorConfig::default();
        let settings = CampaignSettings {
            campaign_id: "cmp-1".to_string(),
            budget: Some(100.0),
            target_cpa,
            target_roas: None,
            bidding_strategy: BiddingStrategy::ManualCpc,
        };
        let ctx = RuleContext {
            analysis: &analysis,
            settings: &settings,
            keywords,
            search_terms: &[],
            config: &cfg,
        };
        KeywordHandler.generate(&ctx)
    }

    #[test]
    fn spend_below_floor_is_skipped_entirely() {
        // $5 spend with zero conversions: below the $10 floor, no output.
        let recs = run(&[keyword(5.0, 20, 0.0)], Some(50.0));
        assert!(recs.is_empty());
    }

    #[test]
    fn unconverting_spender_is_paused_with_high_priority() {
        let recs = run(&[keyword(75.0, 30, 0.0)], Some(50.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.rec_type, RecommendationType::PauseKeyword);
        assert_eq!(rec.priority, Priority::High);
        assert!(rec.reasoning.contains("$75.00"));
        assert!(rec.impact_value < 0.0);
    }

    #[test]
    fn cpa_blowout_reasoning_embeds_exact_cpa() {
        // $650 over 3 conversions at a $50 target: CPA $216.67.
        let recs = run(&[keyword(650.0, 120, 3.0)], Some(50.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.rec_type, RecommendationType::PauseKeyword);
        assert_eq!(rec.priority, Priority::High);
        assert!(
            rec.reasoning.contains("216.67"),
            "reasoning was: {}",
            rec.reasoning
        );
    }

    #[test]
    fn low_quality_unconverting_keyword_pauses_at_medium_priority() {
        let mut kw = keyword(30.0, 25, 0.0);
        kw.quality_score = Some(3);
        let recs = run(&[kw], Some(50.0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].reasoning.contains("Quality score 3"));
    }

    #[test]
    fn star_performer_scales_at_high_priority() {
        // 6 conversions at $20 each against a $50 target.
        let recs = run(&[keyword(120.0, 150, 6.0)], Some(50.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.rec_type, RecommendationType::KeywordOptimization);
        assert_eq!(rec.priority, Priority::High);
        match &rec.suggested_change {
            SuggestedChange::ScaleKeyword {
                spend_increase_percentage,
                ..
            } => assert_eq!(*spend_increase_percentage, 20.0),
            other => panic!("expected scale change, got {other:?}"),
        }
    }

    #[test]
    fn steady_performer_scales_at_medium_priority() {
        // 4 conversions from 100 clicks (4% rate) at $45 CPA, $50 target.
        let recs = run(&[keyword(180.0, 100, 4.0)], Some(50.0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].reasoning.contains("4.0%"));
    }

    #[test]
    fn cpa_between_target_and_band_top_gets_optimize() {
        // CPA $60 against a $50 target: inside (target, 1.5x target].
        let recs = run(&[keyword(120.0, 100, 2.0)], Some(50.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert!(rec.reasoning.contains("$60.00"));
        match &rec.suggested_change {
            SuggestedChange::OptimizeKeyword { action, .. } => {
                assert!(action.contains("tighten bids"))
            }
            other => panic!("expected optimize change, got {other:?}"),
        }
    }

    #[test]
    fn converting_keyword_with_weak_ctr_gets_low_priority_optimize() {
        // CPA on target ($40), CTR 0.5%: only the CTR rule fires.
        let kw = KeywordPerformance {
            keyword_id: "kw-2".to_string(),
            text: "trail shoes".to_string(),
            cost: 80.0,
            clicks: 40,
            impressions: 8000,
            conversions: 2.0,
            quality_score: Some(8),
        };
        let recs = run(&[kw], Some(50.0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
        assert!(recs[0].reasoning.contains("0.5%"));
    }

    #[test]
    fn cpa_rules_are_skipped_without_a_target() {
        // CPA $60 would hit the optimize band, but no target is configured.
        let recs = run(&[keyword(120.0, 100, 2.0)], None);
        assert!(recs.is_empty());
    }

    #[test]
    fn first_matching_rule_wins() {
        // Low quality score AND zero conversions at high spend: the
        // unconverting-spender pause outranks the low-quality pause.
        let mut kw = keyword(90.0, 40, 0.0);
        kw.quality_score = Some(2);
        let recs = run(&[kw], Some(50.0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].reasoning.contains("pause threshold"));
    }
}
