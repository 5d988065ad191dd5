use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::zones::{classify, RiskZone};
use crate::{types::*, HealthError, HealthResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// The eight quantities the public-company Z-Score consumes.
///
/// `retained_earnings` and `ebit` may be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub total_assets: Money,
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub retained_earnings: Money,
    pub ebit: Money,
    pub total_liabilities: Money,
    pub market_value_equity: Money,
    pub total_revenue: Money,
}

impl FinancialRecord {
    /// Worked example: a healthy mid-sized manufacturer (Z = 5.155).
    pub fn example() -> Self {
        Self {
            total_assets: dec!(2_000_000),
            current_assets: dec!(1_000_000),
            current_liabilities: dec!(300_000),
            retained_earnings: dec!(800_000),
            ebit: dec!(500_000),
            total_liabilities: dec!(500_000),
            market_value_equity: dec!(2_500_000),
            total_revenue: dec!(700_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreComponent {
    pub name: String,
    pub ratio: Ratio,
    pub coefficient: Decimal,
    pub weighted_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub x1: Ratio,
    pub x2: Ratio,
    pub x3: Ratio,
    pub x4: Ratio,
    pub x5: Ratio,
    pub z_score: Decimal,
    pub components: Vec<ZScoreComponent>,
    /// True when total liabilities were zero and X4 was computed against a
    /// denominator of 1. X4 is then an artifact, not a leverage ratio.
    pub liabilities_substituted: bool,
}

/// Score plus its classification, as presented to a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScoreAnalysis {
    pub score: ScoreResult,
    pub zone: RiskZone,
    pub zone_label: String,
    pub zone_class: String,
    pub recommendation: String,
}

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

// Original Z-Score (public manufacturing)
const Z_COEFF_X1: Decimal = dec!(1.2);
const Z_COEFF_X2: Decimal = dec!(1.4);
const Z_COEFF_X3: Decimal = dec!(3.3);
const Z_COEFF_X4: Decimal = dec!(0.6);
const Z_COEFF_X5: Decimal = dec!(1.0);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the five Altman ratios and the weighted composite.
///
/// Pure and deterministic. Total liabilities of exactly zero are replaced by
/// 1 in X4 (flagged via `liabilities_substituted`); the total-assets ratios
/// are unguarded. Arithmetic is checked, and any overflow or division by a
/// zero total-assets figure surfaces as `NonFiniteScore` rather than a
/// number.
pub fn calculate_z_score(record: &FinancialRecord) -> HealthResult<ScoreResult> {
    let working_capital = record
        .current_assets
        .checked_sub(record.current_liabilities)
        .ok_or_else(|| non_finite("working capital"))?;

    let x1 = checked_ratio(
        working_capital,
        record.total_assets,
        "X1: Working Capital / Total Assets",
    )?;
    let x2 = checked_ratio(
        record.retained_earnings,
        record.total_assets,
        "X2: Retained Earnings / Total Assets",
    )?;
    let x3 = checked_ratio(record.ebit, record.total_assets, "X3: EBIT / Total Assets")?;

    let liabilities_substituted = record.total_liabilities.is_zero();
    let liabilities = if liabilities_substituted {
        Decimal::ONE
    } else {
        record.total_liabilities
    };
    let x4 = checked_ratio(
        record.market_value_equity,
        liabilities,
        "X4: Market Value of Equity / Total Liabilities",
    )?;

    let x5 = checked_ratio(
        record.total_revenue,
        record.total_assets,
        "X5: Revenue / Total Assets",
    )?;

    let components = vec![
        build_component("X1: Working Capital / Total Assets", x1, Z_COEFF_X1)?,
        build_component("X2: Retained Earnings / Total Assets", x2, Z_COEFF_X2)?,
        build_component("X3: EBIT / Total Assets", x3, Z_COEFF_X3)?,
        build_component(
            "X4: Market Value of Equity / Total Liabilities",
            x4,
            Z_COEFF_X4,
        )?,
        build_component("X5: Revenue / Total Assets", x5, Z_COEFF_X5)?,
    ];

    let z_score = components
        .iter()
        .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.weighted_value))
        .ok_or_else(|| non_finite("Z-Score sum"))?;

    Ok(ScoreResult {
        x1,
        x2,
        x3,
        x4,
        x5,
        z_score,
        components,
        liabilities_substituted,
    })
}

/// Score and classify a record, wrapped in the standard output envelope.
pub fn analyze_record(record: &FinancialRecord) -> HealthResult<ComputationOutput<ZScoreAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let score = calculate_z_score(record)?;

    if score.liabilities_substituted {
        warnings.push(
            "total_liabilities is zero; X4 uses a denominator of 1 and is not a true \
             leverage ratio."
                .to_string(),
        );
    }
    if record.current_assets < record.current_liabilities {
        warnings.push("Negative working capital drags X1 below zero.".to_string());
    }

    let classification = classify(score.z_score);
    let analysis = ZScoreAnalysis {
        zone: classification.zone,
        zone_label: classification.label,
        zone_class: classification.class_tag,
        recommendation: classification.zone.recommendation().to_string(),
        score,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "methodology": "Altman Z-Score bankruptcy prediction",
        "original_z": "Z = 1.2*X1 + 1.4*X2 + 3.3*X3 + 0.6*X4 + 1.0*X5",
        "zones": "Safe > 2.99, Gray 1.81..=2.99, Distress < 1.81",
        "x4_guard": "total_liabilities of 0 replaced by 1"
    });

    Ok(with_metadata(
        "Altman Z-Score (public company)",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn non_finite(context: &str) -> HealthError {
    HealthError::NonFiniteScore {
        context: context.to_string(),
    }
}

fn checked_ratio(numerator: Decimal, denominator: Decimal, context: &str) -> HealthResult<Ratio> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| non_finite(context))
}

fn build_component(name: &str, ratio: Ratio, coefficient: Decimal) -> HealthResult<ZScoreComponent> {
    let weighted_value = coefficient
        .checked_mul(ratio)
        .ok_or_else(|| non_finite(name))?;
    Ok(ZScoreComponent {
        name: name.to_string(),
        ratio,
        coefficient,
        weighted_value,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn distressed_record() -> FinancialRecord {
        FinancialRecord {
            total_assets: dec!(1_000_000),
            current_assets: dec!(200_000),
            current_liabilities: dec!(300_000),
            retained_earnings: dec!(-200_000),
            ebit: dec!(10_000),
            total_liabilities: dec!(900_000),
            market_value_equity: dec!(50_000),
            total_revenue: dec!(400_000),
        }
    }

    #[test]
    fn test_worked_example_ratios() {
        let result = calculate_z_score(&FinancialRecord::example()).unwrap();

        assert_eq!(result.x1, dec!(0.35));
        assert_eq!(result.x2, dec!(0.40));
        assert_eq!(result.x3, dec!(0.25));
        assert_eq!(result.x4, dec!(5.0));
        assert_eq!(result.x5, dec!(0.35));
        // 0.42 + 0.56 + 0.825 + 3.0 + 0.35
        assert_eq!(result.z_score, dec!(5.155));
        assert!(!result.liabilities_substituted);
    }

    #[test]
    fn test_weighted_components_sum_to_score() {
        let result = calculate_z_score(&distressed_record()).unwrap();
        let sum: Decimal = result.components.iter().map(|c| c.weighted_value).sum();
        assert_eq!(sum, result.z_score);

        let expected = dec!(1.2) * result.x1
            + dec!(1.4) * result.x2
            + dec!(3.3) * result.x3
            + dec!(0.6) * result.x4
            + dec!(1.0) * result.x5;
        assert_eq!(result.z_score, expected);
    }

    #[test]
    fn test_component_coefficients() {
        let result = calculate_z_score(&FinancialRecord::example()).unwrap();
        let coefficients: Vec<Decimal> = result.components.iter().map(|c| c.coefficient).collect();
        assert_eq!(
            coefficients,
            vec![dec!(1.2), dec!(1.4), dec!(3.3), dec!(0.6), dec!(1.0)]
        );
        // X4: 0.6 * 5.0 = 3.0
        assert_eq!(result.components[3].weighted_value, dec!(3.0));
    }

    #[test]
    fn test_zero_liabilities_guard() {
        let record = FinancialRecord {
            total_liabilities: Decimal::ZERO,
            market_value_equity: dec!(1_000_000),
            ..FinancialRecord::example()
        };
        let result = calculate_z_score(&record).unwrap();
        assert_eq!(result.x4, dec!(1_000_000));
        assert!(result.liabilities_substituted);
    }

    #[test]
    fn test_zero_total_assets_is_non_finite() {
        let record = FinancialRecord {
            total_assets: Decimal::ZERO,
            ..FinancialRecord::example()
        };
        match calculate_z_score(&record).unwrap_err() {
            HealthError::NonFiniteScore { context } => assert!(context.starts_with("X1")),
            other => panic!("Expected NonFiniteScore, got {other:?}"),
        }
    }

    #[test]
    fn test_overflow_is_non_finite() {
        let record = FinancialRecord {
            total_assets: Decimal::ONE,
            current_assets: Decimal::ZERO,
            current_liabilities: Decimal::ZERO,
            retained_earnings: Decimal::ZERO,
            ebit: Decimal::ZERO,
            total_liabilities: Decimal::ZERO,
            market_value_equity: Decimal::MAX,
            total_revenue: Decimal::MAX,
        };
        let err = calculate_z_score(&record).unwrap_err();
        assert!(matches!(err, HealthError::NonFiniteScore { .. }));
    }

    #[test]
    fn test_negative_working_capital() {
        let result = calculate_z_score(&distressed_record()).unwrap();
        assert!(result.x1 < Decimal::ZERO);
        assert!(result.x2 < Decimal::ZERO);
    }

    #[test]
    fn test_idempotent() {
        let record = distressed_record();
        let a = calculate_z_score(&record).unwrap();
        let b = calculate_z_score(&record).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.z_score.mantissa(), b.z_score.mantissa());
        assert_eq!(a.z_score.scale(), b.z_score.scale());
    }

    #[test]
    fn test_analyze_record_safe() {
        let out = analyze_record(&FinancialRecord::example()).unwrap();
        assert_eq!(out.result.zone, RiskZone::Safe);
        assert_eq!(out.result.zone_label, "Safe Zone");
        assert_eq!(out.result.zone_class, "safe-zone");
        assert!(out.warnings.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(out.methodology.contains("Altman"));
    }

    #[test]
    fn test_analyze_record_warns_on_substitution() {
        let record = FinancialRecord {
            total_liabilities: Decimal::ZERO,
            ..FinancialRecord::example()
        };
        let out = analyze_record(&record).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("total_liabilities")));
    }

    #[test]
    fn test_analyze_record_distress() {
        let out = analyze_record(&distressed_record()).unwrap();
        assert_eq!(out.result.zone, RiskZone::Distress);
        assert!(out.result.recommendation.contains("High distress risk"));
        assert!(out.warnings.iter().any(|w| w.contains("working capital")));
    }
}
