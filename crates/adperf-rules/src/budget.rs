// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::engine::{CategoryHandler, RecommendationCategory, RuleContext};
use crate::types::{CandidateRecommendation, SuggestedChange};
use adperf_core::{MetricKind, Priority, RecommendationType};
use adperf_stats::{OverallHealth, PerformanceAnalysis, TrendDirection};

const INCREASE_CONFIDENCE: f64 = 0.85;
const DECREASE_CONFIDENCE: f64 = 0.80;
const MAINTAIN_CONFIDENCE: f64 = 0.70;

/// Spend-efficiency classification the budget rules key on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetEfficiency {
    High,
    Medium,
    Low,
}

/// High: excellent health with no high-severity outliers. Low: poor health
/// or more than three high-severity outliers. Medium otherwise.
pub fn classify_budget_efficiency(analysis: &PerformanceAnalysis) -> BudgetEfficiency {
    let high_outliers = analysis.high_severity_outlier_count();
    match analysis.summary.overall_health {
        OverallHealth::Excellent if high_outliers == 0 => BudgetEfficiency::High,
        OverallHealth::Poor => BudgetEfficiency::Low,
        _ if high_outliers > 3 => BudgetEfficiency::Low,
        _ => BudgetEfficiency::Medium,
    }
}

/// Budget rule table. Skipped entirely when the campaign has no budget
/// configured.
pub struct BudgetHandler;

impl CategoryHandler for BudgetHandler {
    fn category(&self) -> RecommendationCategory {
        RecommendationCategory::Budget
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Vec<CandidateRecommendation> {
        let Some(budget) = ctx.settings.budget else {
            return vec![];
        };
        if budget <= 0.0 {
            return vec![];
        }

        let efficiency = classify_budget_efficiency(ctx.analysis);
        let cpa_direction = ctx.cpa_trend().map(|t| t.direction);
        let conversions_direction = ctx.conversions_trend().map(|t| t.direction);
        let health = ctx.analysis.summary.overall_health;

        if efficiency == BudgetEfficiency::High
            && cpa_direction == Some(TrendDirection::Decreasing)
        {
            return vec![increase_budget(ctx, budget)];
        }

        if (efficiency == BudgetEfficiency::Low || health == OverallHealth::Poor)
            && cpa_direction == Some(TrendDirection::Increasing)
        {
            return vec![decrease_budget(ctx, budget)];
        }

        if efficiency == BudgetEfficiency::Medium
            && conversions_direction == Some(TrendDirection::Stable)
        {
            return vec![maintain_budget(ctx, budget)];
        }

        vec![]
    }
}

fn increase_budget(ctx: &RuleContext<'_>, budget: f64) -> CandidateRecommendation {
    let pct = ctx.config.budget_increase_pct;
    let suggested = budget * (1.0 + pct / 100.0);
    CandidateRecommendation {
        rec_type: RecommendationType::BudgetAdjustment,
        campaign_id: ctx.analysis.campaign_id.clone(),
        title: format!("Increase daily budget by {pct:.1}%"),
        description: format!(
            "Raise the daily budget from ${budget:.2} to ${suggested:.2} to capture additional efficient demand."
        ),
        reasoning: format!(
            "Campaign efficiency is high and cost per conversion is trending down ({:+.1}% over the window); current spend is converting efficiently.",
            ctx.cpa_trend().map_or(0.0, |t| t.change_percentage)
        ),
        expected_impact: format!("{pct:+.1}% cost, with conversions expected to follow"),
        impact_metric: MetricKind::Cost,
        impact_value: pct,
        confidence_score: INCREASE_CONFIDENCE,
        priority: Priority::High,
        suggested_change: SuggestedChange::Budget {
            current_budget: budget,
            suggested_budget: suggested,
            change_percentage: pct,
        },
    }
}

fn decrease_budget(ctx: &RuleContext<'_>, budget: f64) -> CandidateRecommendation {
    let pct = ctx.config.budget_decrease_pct;
    let suggested = budget * (1.0 - pct / 100.0);
    CandidateRecommendation {
        rec_type: RecommendationType::BudgetAdjustment,
        campaign_id: ctx.analysis.campaign_id.clone(),
        title: format!("Decrease daily budget by {pct:.1}%"),
        description: format!(
            "Reduce the daily budget from ${budget:.2} to ${suggested:.2} until efficiency recovers."
        ),
        reasoning: format!(
            "Campaign efficiency is low and cost per conversion is trending up ({:+.1}% over the window); continued spend at this level is wasteful.",
            ctx.cpa_trend().map_or(0.0, |t| t.change_percentage)
        ),
        expected_impact: format!("{:+.1}% cost", -pct),
        impact_metric: MetricKind::Cost,
        impact_value: -pct,
        confidence_score: DECREASE_CONFIDENCE,
        priority: Priority::Critical,
        suggested_change: SuggestedChange::Budget {
            current_budget: budget,
            suggested_budget: suggested,
            change_percentage: -pct,
        },
    }
}

fn maintain_budget(ctx: &RuleContext<'_>, budget: f64) -> CandidateRecommendation {
    CandidateRecommendation {
        rec_type: RecommendationType::BudgetAdjustment,
        campaign_id: ctx.analysis.campaign_id.clone(),
        title: "Maintain budget and optimize within current spend".to_string(),
        description: format!(
            "Keep the daily budget at ${budget:.2}; focus on keyword and bid optimization before changing spend."
        ),
        reasoning:
            "Efficiency is moderate and conversions are stable; budget changes are unlikely to move results until targeting improves."
                .to_string(),
        expected_impact: "+0.0% cost".to_string(),
        impact_metric: MetricKind::Cost,
        impact_value: 0.0,
        confidence_score: MAINTAIN_CONFIDENCE,
        priority: Priority::Medium,
        suggested_change: SuggestedChange::Budget {
            current_budget: budget,
            suggested_budget: budget,
            change_percentage: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{BudgetEfficiency, BudgetHandler, classify_budget_efficiency};
    use crate::config::GeneratorConfig;
    use crate::engine::{CategoryHandler, RuleContext};
    use crate::types::SuggestedChange;
    use adperf_core::{BiddingStrategy, CampaignSettings, MetricRecord, Priority};
    use adperf_stats::{AnalyzerConfig, OverallHealth, PerformanceAnalysis, analyze};
    use chrono::{Days, NaiveDate};

    fn record(day: usize, cost: f64, conversions: f64, conversion_value: f64) -> MetricRecord {
        MetricRecord {
            date: NaiveDate::from_ymd_opt(2026, 1, 1)
                .expect("valid date")
                .checked_add_days(Days::new(day as u64))
                .expect("valid offset"),
            impressions: 2000,
            clicks: 100,
            cost,
            conversions,
            conversion_value,
        }
    }

    fn settings(budget: Option<f64>) -> CampaignSettings {
        CampaignSettings {
            campaign_id: "cmp-1".to_string(),
            budget,
            target_cpa: Some(50.0),
            target_roas: None,
            bidding_strategy: BiddingStrategy::ManualCpc,
        }
    }

    fn analyze_records(records: &[MetricRecord]) -> PerformanceAnalysis {
        analyze("cmp-1", records, 30, &AnalyzerConfig::default()).expect("analysis")
    }

    /// Constant cost, rising conversions: CPA trends down, health excellent.
    fn efficient_analysis() -> PerformanceAnalysis {
        let records: Vec<MetricRecord> = (0..30)
            .map(|d| {
                let conversions = 2.0 + 2.0 * d as f64 / 29.0;
                record(d, 100.0, conversions, conversions * 90.0)
            })
            .collect();
        analyze_records(&records)
    }

    /// Rising cost, falling conversions: all three concerning trends.
    fn wasteful_analysis() -> PerformanceAnalysis {
        let records: Vec<MetricRecord> = (0..30)
            .map(|d| {
                let conversions = 4.0 - 3.0 * d as f64 / 29.0;
                record(d, 100.0 + 300.0 * d as f64 / 29.0, conversions, conversions * 90.0)
            })
            .collect();
        analyze_records(&records)
    }

    /// Flat spend and conversions, ROAS steps down: one adverse significant
    /// change, no concerning trends.
    fn moderate_analysis() -> PerformanceAnalysis {
        let records: Vec<MetricRecord> = (0..30)
            .map(|d| {
                let value = if d < 15 { 400.0 } else { 200.0 };
                record(d, 100.0, 2.0, value)
            })
            .collect();
        analyze_records(&records)
    }

    fn run(analysis: &PerformanceAnalysis, budget: Option<f64>) -> Vec<crate::types::CandidateRecommendation> {
        let cfg = GeneratorConfig::default();
        let settings = settings(budget);
        let ctx = RuleContext {
            analysis,
            settings: &settings,
            keywords: &[],
            search_terms: &[],
            config: &cfg,
        };
        BudgetHandler.generate(&ctx)
    }

    #[test]
    fn efficient_campaign_gets_exact_twenty_percent_increase() {
        let analysis = efficient_analysis();
        assert_eq!(analysis.summary.overall_health, OverallHealth::Excellent);
        assert_eq!(
            classify_budget_efficiency(&analysis),
            BudgetEfficiency::High
        );

        let recs = run(&analysis, Some(150.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.confidence_score, 0.85);
        assert!(rec.description.contains("$180.00"));
        match &rec.suggested_change {
            SuggestedChange::Budget {
                current_budget,
                suggested_budget,
                change_percentage,
            } => {
                assert_eq!(*current_budget, 150.0);
                assert!((*suggested_budget - 180.0).abs() < 1e-9);
                assert_eq!(*change_percentage, 20.0);
            }
            other => panic!("expected budget change, got {other:?}"),
        }
    }

    #[test]
    fn wasteful_campaign_gets_critical_decrease() {
        let analysis = wasteful_analysis();
        assert_eq!(analysis.summary.overall_health, OverallHealth::Poor);
        assert_eq!(classify_budget_efficiency(&analysis), BudgetEfficiency::Low);

        let recs = run(&analysis, Some(200.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::Critical);
        assert_eq!(rec.confidence_score, 0.80);
        assert_eq!(rec.impact_value, -30.0);
        assert!(rec.description.contains("$140.00"));
    }

    #[test]
    fn moderate_campaign_gets_maintain_recommendation() {
        let analysis = moderate_analysis();
        assert_eq!(
            classify_budget_efficiency(&analysis),
            BudgetEfficiency::Medium
        );

        let recs = run(&analysis, Some(120.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.impact_value, 0.0);
        match &rec.suggested_change {
            SuggestedChange::Budget {
                suggested_budget, ..
            } => assert_eq!(*suggested_budget, 120.0),
            other => panic!("expected budget change, got {other:?}"),
        }
    }

    #[test]
    fn missing_budget_skips_the_category() {
        let analysis = efficient_analysis();
        assert!(run(&analysis, None).is_empty());
    }
}
