// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::config::EstimatorConfig;
use crate::estimate::{ImpactEstimate, RiskLevel};
use crate::tables::ImplementationComplexity;

const LARGE_CHANGE_PCT: f64 = 20.0;
const MODERATE_CHANGE_PCT: f64 = 10.0;
const LARGE_CHANGE_BONUS: f64 = 10.0;
const MODERATE_CHANGE_BONUS: f64 = 5.0;
const RISK_ADJUSTMENT: f64 = 10.0;
const SECONDARY_BONUS: f64 = 5.0;

/// A secondary impact helps when it moves its metric the right way:
/// spend-side metrics down, volume metrics up.
fn is_beneficial(estimate: &ImpactEstimate) -> bool {
    if estimate.metric.lower_is_better() {
        estimate.expected_change < 0.0
    } else {
        estimate.expected_change > 0.0
    }
}

/// Overall impact score in [0, 100]: the composite confidence scaled to
/// 100, adjusted for change magnitude, risk level, and beneficial
/// spillovers.
pub fn overall_score(primary: &ImpactEstimate, secondaries: &[ImpactEstimate]) -> f64 {
    let mut score = 100.0 * primary.confidence_score;

    let magnitude = primary.expected_change_percentage.abs();
    if magnitude > LARGE_CHANGE_PCT {
        score += LARGE_CHANGE_BONUS;
    } else if magnitude > MODERATE_CHANGE_PCT {
        score += MODERATE_CHANGE_BONUS;
    }

    match primary.risk_assessment.risk_level {
        RiskLevel::Low => score += RISK_ADJUSTMENT,
        RiskLevel::High => score -= RISK_ADJUSTMENT,
        RiskLevel::Medium => {}
    }

    score += SECONDARY_BONUS
        * secondaries
            .iter()
            .filter(|estimate| is_beneficial(estimate))
            .count() as f64;

    score.clamp(0.0, 100.0)
}

/// `(total benefit - implementation cost) / implementation cost * 100`,
/// where the benefit is the absolute projected monthly primary impact plus
/// half of each secondary's.
pub fn expected_roi(
    primary: &ImpactEstimate,
    secondaries: &[ImpactEstimate],
    complexity: ImplementationComplexity,
    cfg: &EstimatorConfig,
) -> f64 {
    let total_benefit = primary.projected_monthly_impact.abs()
        + 0.5
            * secondaries
                .iter()
                .map(|estimate| estimate.projected_monthly_impact.abs())
                .sum::<f64>();
    let implementation_cost = match complexity {
        ImplementationComplexity::Low => cfg.complexity_cost_low,
        ImplementationComplexity::Medium => cfg.complexity_cost_medium,
        ImplementationComplexity::High => cfg.complexity_cost_high,
    };

    (total_benefit - implementation_cost) / implementation_cost * 100.0
}

#[cfg(test)]
mod tests {
    use super::{expected_roi, overall_score};
    use crate::config::EstimatorConfig;
    use crate::estimate::{ImpactEstimate, ImpactRange, RiskAssessment, RiskLevel};
    use crate::tables::{ImplementationComplexity, TimeToImpact};
    use adperf_core::MetricKind;

    fn estimate(
        metric: MetricKind,
        pct: f64,
        change: f64,
        monthly: f64,
        risk: RiskLevel,
        confidence: f64,
    ) -> ImpactEstimate {
        ImpactEstimate {
            metric,
            current_value: 100.0,
            expected_change: change,
            expected_change_percentage: pct,
            expected_new_value: 100.0 + change,
            confidence_interval: ImpactRange {
                lower: 95.0 + change,
                upper: 105.0 + change,
            },
            risk_assessment: RiskAssessment {
                best_case: 105.0 + change,
                worst_case: 95.0 + change,
                expected_case: 100.0 + change,
                risk_level: risk,
                upside: 5.0,
                downside: 5.0,
            },
            confidence_score: confidence,
            sample_size: 30,
            standard_error: 2.5,
            projected_monthly_impact: monthly,
            time_to_impact: TimeToImpact::Immediate,
        }
    }

    #[test]
    fn score_combines_confidence_magnitude_and_risk() {
        let primary = estimate(MetricKind::Cost, -30.0, -30.0, -900.0, RiskLevel::Low, 0.6);
        // 60 base + 10 large change + 10 low risk.
        let score = overall_score(&primary, &[]);
        assert!((score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn moderate_change_earns_the_smaller_bonus() {
        let primary = estimate(MetricKind::Cost, 12.0, 12.0, 360.0, RiskLevel::Medium, 0.6);
        let score = overall_score(&primary, &[]);
        assert!((score - 65.0).abs() < 1e-9);
    }

    #[test]
    fn high_risk_subtracts_and_beneficial_secondaries_add() {
        let primary = estimate(MetricKind::Cost, -30.0, -30.0, -900.0, RiskLevel::High, 0.6);
        let helpful = estimate(
            MetricKind::CostPerConversion,
            -15.0,
            -7.5,
            -225.0,
            RiskLevel::Medium,
            0.6,
        );
        let harmful = estimate(
            MetricKind::Conversions,
            -5.0,
            -0.2,
            -6.0,
            RiskLevel::Medium,
            0.6,
        );
        // 60 + 10 (magnitude) - 10 (high risk) + 5 (one beneficial secondary).
        let score = overall_score(&primary, &[helpful, harmful]);
        assert!((score - 65.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_clipped_to_the_valid_range() {
        let primary = estimate(MetricKind::Cost, -50.0, -50.0, -1500.0, RiskLevel::Low, 1.0);
        let bonus = estimate(
            MetricKind::CostPerConversion,
            -40.0,
            -20.0,
            -600.0,
            RiskLevel::Low,
            1.0,
        );
        let score = overall_score(&primary, &[bonus; 4].to_vec());
        assert_eq!(score, 100.0);
    }

    #[test]
    fn roi_compares_monthly_benefit_to_tier_cost() {
        let primary = estimate(MetricKind::Cost, -20.0, -20.0, -600.0, RiskLevel::Low, 0.7);
        let secondary = estimate(
            MetricKind::CostPerConversion,
            -16.0,
            -8.0,
            -240.0,
            RiskLevel::Medium,
            0.7,
        );
        let cfg = EstimatorConfig::default();
        // Benefit = 600 + 120 = 720 against a $100 low-complexity cost.
        let roi = expected_roi(&primary, &[secondary], ImplementationComplexity::Low, &cfg);
        assert!((roi - 620.0).abs() < 1e-9);

        let roi_medium = expected_roi(&primary, &[], ImplementationComplexity::Medium, &cfg);
        assert!((roi_medium - 100.0).abs() < 1e-9);
    }
}
