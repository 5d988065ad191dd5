use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zscore_core::scoring::{analyze_record, calculate_z_score, classify_zone, FinancialRecord, RiskZone};
use zscore_core::statements::{
    build_report, resolve_field, resolve_fields, resolve_statement, DataQuality, RawStatement,
};
use zscore_core::HealthError;

// ===========================================================================
// Statement → record → score → zone
// ===========================================================================

fn sample_statement_json() -> &'static str {
    r#"{
        "balance_sheet": {
            "Total Assets": 2000000,
            "Current Assets": 1000000,
            "Current Liabilities": 300000,
            "Retained Earnings": 800000,
            "Total Liabilities Net Minority Interest": 500000,
            "Total Liabilities": 999999,
            "Common Stock Equity": 2500000,
            "Goodwill": null
        },
        "income_statement": {
            "EBIT": 0,
            "Operating Income": 500000,
            "Total Revenue": 700000
        }
    }"#
}

#[test]
fn test_statement_to_safe_zone() {
    let raw: RawStatement = serde_json::from_str(sample_statement_json()).unwrap();
    let resolved = resolve_statement(&raw).unwrap();

    assert_eq!(resolved.record, FinancialRecord::example());

    let score = calculate_z_score(&resolved.record).unwrap();
    assert_eq!(score.z_score, dec!(5.155));
    assert_eq!(classify_zone(score.z_score), RiskZone::Safe);
}

#[test]
fn test_zero_alias_falls_through_to_next() {
    let raw: RawStatement = serde_json::from_str(sample_statement_json()).unwrap();
    let resolutions = resolve_fields(&raw);
    let ebit = resolutions
        .iter()
        .find(|r| r.field.key() == "ebit")
        .unwrap();
    assert_eq!(ebit.matched_alias.as_deref(), Some("Operating Income"));
    assert_eq!(ebit.value, dec!(500000));
}

#[test]
fn test_resolver_first_nonzero_wins() {
    let mut section = std::collections::BTreeMap::new();
    section.insert("a".to_string(), dec!(0));
    section.insert("b".to_string(), dec!(5));
    section.insert("c".to_string(), dec!(7));

    assert_eq!(resolve_field(&section, &["a", "b", "c"]), (dec!(5), Some("b")));
    assert_eq!(resolve_field(&section, &["a", "z"]), (Decimal::ZERO, None));
}

#[test]
fn test_missing_revenue_is_critical() {
    let raw: RawStatement = serde_json::from_str(
        r#"{"balance_sheet": {"Total Assets": 1000}, "income_statement": {}}"#,
    )
    .unwrap();

    match resolve_statement(&raw) {
        Err(HealthError::CriticalFieldMissing { fields }) => {
            assert_eq!(fields, vec!["total_revenue".to_string()]);
        }
        other => panic!("Expected CriticalFieldMissing, got {other:?}"),
    }
}

#[test]
fn test_diagnostics_for_sparse_statement() {
    let raw: RawStatement = serde_json::from_str(
        r#"{"balance_sheet": {"TotalAssets": 1000, "CurrentAssets": 400},
            "income_statement": {"Revenue": 900}}"#,
    )
    .unwrap();
    let report = build_report("ACME", &resolve_fields(&raw));

    assert_eq!(report.missing_count, 5);
    assert_eq!(report.quality, DataQuality::Unreliable);
    assert!(report.summary.contains("unreliable"));
    assert_eq!(report.entries.len(), 8);
}

// ===========================================================================
// Calculator properties
// ===========================================================================

#[test]
fn test_x4_guard_for_zero_liabilities() {
    let record = FinancialRecord {
        total_liabilities: Decimal::ZERO,
        market_value_equity: dec!(1_000_000),
        ..FinancialRecord::example()
    };
    let score = calculate_z_score(&record).unwrap();
    assert_eq!(score.x4, dec!(1_000_000));
    assert!(score.liabilities_substituted);
}

#[test]
fn test_scoring_is_deterministic() {
    let record = FinancialRecord {
        total_assets: dec!(3_333_333),
        ..FinancialRecord::example()
    };
    let a = calculate_z_score(&record).unwrap();
    let b = calculate_z_score(&record).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.z_score.to_string(), b.z_score.to_string());
}

#[test]
fn test_zero_total_assets_is_non_finite() {
    let record = FinancialRecord {
        total_assets: Decimal::ZERO,
        ..FinancialRecord::example()
    };
    assert!(matches!(
        calculate_z_score(&record),
        Err(HealthError::NonFiniteScore { .. })
    ));
}

#[test]
fn test_analysis_envelope() {
    let out = analyze_record(&FinancialRecord::example()).unwrap();
    assert_eq!(out.result.zone_label, "Safe Zone");
    assert_eq!(out.result.zone_class, "safe-zone");
    assert!(out.warnings.is_empty());
    assert_eq!(out.result.score.components.len(), 5);
}

#[test]
fn test_zone_boundaries() {
    assert_eq!(classify_zone(dec!(2.99)), RiskZone::Gray);
    assert_eq!(classify_zone(dec!(2.990001)), RiskZone::Safe);
    assert_eq!(classify_zone(dec!(1.81)), RiskZone::Gray);
    assert_eq!(classify_zone(dec!(1.809999)), RiskZone::Distress);
}
