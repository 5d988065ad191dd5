//! Field resolution: raw provider statement → `FinancialRecord`.
//!
//! For each quantity the ordered alias list is walked and the first alias
//! present with a non-zero value wins. A quantity whose true value is exactly
//! zero therefore resolves as "not found"; this is a known limitation kept
//! so that every company in a peer set is resolved under identical rules.
//!
//! Null values are dropped when a statement is deserialised, so a null label
//! behaves like an absent one and resolution moves on to the next alias. A
//! provider that reports a null for a quantity therefore does not disqualify
//! the company; it is scored from the next available label, or from zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::fields::{FinancialField, StatementKind};
use crate::scoring::altman::FinancialRecord;
use crate::types::Money;
use crate::{HealthError, HealthResult};

/// Label → value map for one statement.
pub type StatementSection = BTreeMap<String, Decimal>;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Latest-period statement fields for one company, as returned by a provider.
///
/// Null values are dropped on deserialisation and treated as absent labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatement {
    #[serde(default, deserialize_with = "drop_nulls")]
    pub balance_sheet: StatementSection,
    #[serde(default, deserialize_with = "drop_nulls")]
    pub income_statement: StatementSection,
}

impl RawStatement {
    pub fn section(&self, kind: StatementKind) -> &StatementSection {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
        }
    }
}

/// Outcome of resolving one quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResolution {
    pub field: FinancialField,
    pub value: Money,
    /// The alias that supplied the value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_alias: Option<String>,
    pub found: bool,
}

/// Resolutions for all eight quantities, in record order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResolutions {
    pub entries: Vec<FieldResolution>,
}

/// A successfully resolved statement: the record plus its diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedStatement {
    pub record: FinancialRecord,
    pub resolutions: FieldResolutions,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Return the value of the first alias present in `section` whose value is
/// not exactly zero, with the alias that matched.
///
/// Falls back to `(0, None)` when no alias is present or every present alias
/// maps to zero.
pub fn resolve_field<'a>(section: &StatementSection, aliases: &[&'a str]) -> (Money, Option<&'a str>) {
    for alias in aliases {
        if let Some(value) = section.get(*alias) {
            if !value.is_zero() {
                return (*value, Some(*alias));
            }
        }
    }
    (Decimal::ZERO, None)
}

/// Resolve every quantity of the Altman model from a raw statement.
///
/// Never fails; missing quantities are reported with `found == false`.
pub fn resolve_fields(raw: &RawStatement) -> FieldResolutions {
    let entries = FinancialField::ALL
        .iter()
        .map(|field| {
            let section = raw.section(field.statement());
            let (value, alias) = resolve_field(section, field.aliases());
            match alias {
                Some(a) => tracing::debug!(field = field.key(), alias = a, "resolved field"),
                None => tracing::debug!(field = field.key(), "field not found"),
            }
            FieldResolution {
                field: *field,
                value,
                matched_alias: alias.map(str::to_string),
                found: alias.is_some(),
            }
        })
        .collect();

    FieldResolutions { entries }
}

/// Resolve a raw statement into a `FinancialRecord`.
///
/// Fails with `CriticalFieldMissing` when total assets or total revenue
/// cannot be located.
pub fn resolve_statement(raw: &RawStatement) -> HealthResult<ResolvedStatement> {
    let resolutions = resolve_fields(raw);
    let record = resolutions.to_record()?;
    Ok(ResolvedStatement {
        record,
        resolutions,
    })
}

impl FieldResolutions {
    pub fn get(&self, field: FinancialField) -> Option<&FieldResolution> {
        self.entries.iter().find(|r| r.field == field)
    }

    /// Resolved value, zero when absent.
    pub fn value(&self, field: FinancialField) -> Money {
        self.get(field).map(|r| r.value).unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldResolution> {
        self.entries.iter()
    }

    pub fn missing(&self) -> Vec<FinancialField> {
        FinancialField::ALL
            .iter()
            .copied()
            .filter(|f| !self.get(*f).map(|r| r.found).unwrap_or(false))
            .collect()
    }

    pub fn missing_count(&self) -> usize {
        self.missing().len()
    }

    /// Build the record, rejecting it when a critical quantity is missing.
    pub fn to_record(&self) -> HealthResult<FinancialRecord> {
        let critical: Vec<String> = self
            .missing()
            .into_iter()
            .filter(FinancialField::is_critical)
            .map(|f| f.key().to_string())
            .collect();

        if !critical.is_empty() {
            return Err(HealthError::CriticalFieldMissing { fields: critical });
        }

        Ok(FinancialRecord {
            total_assets: self.value(FinancialField::TotalAssets),
            current_assets: self.value(FinancialField::CurrentAssets),
            current_liabilities: self.value(FinancialField::CurrentLiabilities),
            retained_earnings: self.value(FinancialField::RetainedEarnings),
            ebit: self.value(FinancialField::Ebit),
            total_liabilities: self.value(FinancialField::TotalLiabilities),
            market_value_equity: self.value(FinancialField::MarketValueEquity),
            total_revenue: self.value(FinancialField::TotalRevenue),
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn drop_nulls<'de, D>(deserializer: D) -> Result<StatementSection, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Option<Decimal>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn section(pairs: &[(&str, Decimal)]) -> StatementSection {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn full_statement() -> RawStatement {
        RawStatement {
            balance_sheet: section(&[
                ("Total Assets", dec!(2_000_000)),
                ("Current Assets", dec!(1_000_000)),
                ("Current Liabilities", dec!(300_000)),
                ("Retained Earnings", dec!(800_000)),
                ("Total Liabilities Net Minority Interest", dec!(500_000)),
                ("Common Stock Equity", dec!(2_500_000)),
            ]),
            income_statement: section(&[
                ("EBIT", dec!(500_000)),
                ("Total Revenue", dec!(700_000)),
            ]),
        }
    }

    #[test]
    fn test_first_non_zero_alias_wins() {
        let s = section(&[("a", dec!(0)), ("b", dec!(5)), ("c", dec!(7))]);
        let (value, alias) = resolve_field(&s, &["a", "b", "c"]);
        assert_eq!(value, dec!(5));
        assert_eq!(alias, Some("b"));
    }

    #[test]
    fn test_all_zero_is_not_found() {
        let s = section(&[("a", dec!(0)), ("c", dec!(0))]);
        let (value, alias) = resolve_field(&s, &["a", "b", "c"]);
        assert_eq!(value, Decimal::ZERO);
        assert_eq!(alias, None);
    }

    #[test]
    fn test_absent_is_not_found() {
        let s = section(&[("unrelated", dec!(42))]);
        assert_eq!(resolve_field(&s, &["a", "b"]), (Decimal::ZERO, None));
    }

    #[test]
    fn test_alias_order_beats_record_order() {
        let s = section(&[
            ("Total Liabilities", dec!(900)),
            ("Total Liabilities Net Minority Interest", dec!(800)),
        ]);
        let (value, alias) = resolve_field(&s, FinancialField::TotalLiabilities.aliases());
        assert_eq!(value, dec!(800));
        assert_eq!(alias, Some("Total Liabilities Net Minority Interest"));
    }

    #[test]
    fn test_negative_values_are_found() {
        let s = section(&[("Accumulated Deficit", dec!(-250_000))]);
        let (value, alias) = resolve_field(&s, FinancialField::RetainedEarnings.aliases());
        assert_eq!(value, dec!(-250_000));
        assert_eq!(alias, Some("Accumulated Deficit"));
    }

    #[test]
    fn test_resolve_full_statement() {
        let resolved = resolve_statement(&full_statement()).unwrap();
        assert_eq!(resolved.record.total_assets, dec!(2_000_000));
        assert_eq!(resolved.record.total_liabilities, dec!(500_000));
        assert_eq!(resolved.record.market_value_equity, dec!(2_500_000));
        assert_eq!(resolved.record.ebit, dec!(500_000));
        assert_eq!(resolved.resolutions.missing_count(), 0);
        assert_eq!(resolved.resolutions.entries.len(), 8);
    }

    #[test]
    fn test_fields_read_from_their_own_statement() {
        // Revenue on the balance sheet is not picked up.
        let mut raw = full_statement();
        raw.income_statement.remove("Total Revenue");
        raw.balance_sheet
            .insert("Total Revenue".to_string(), dec!(700_000));
        let resolutions = resolve_fields(&raw);
        assert!(!resolutions.get(FinancialField::TotalRevenue).unwrap().found);
    }

    #[test]
    fn test_partial_missing_still_builds_record() {
        let mut raw = full_statement();
        raw.balance_sheet.remove("Retained Earnings");
        raw.income_statement.remove("EBIT");

        let resolved = resolve_statement(&raw).unwrap();
        assert_eq!(resolved.record.retained_earnings, Decimal::ZERO);
        assert_eq!(resolved.record.ebit, Decimal::ZERO);
        assert_eq!(
            resolved.resolutions.missing(),
            vec![FinancialField::RetainedEarnings, FinancialField::Ebit]
        );
    }

    #[test]
    fn test_missing_total_assets_is_critical() {
        let mut raw = full_statement();
        raw.balance_sheet.remove("Total Assets");
        match resolve_statement(&raw).unwrap_err() {
            HealthError::CriticalFieldMissing { fields } => {
                assert_eq!(fields, vec!["total_assets".to_string()]);
            }
            other => panic!("Expected CriticalFieldMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_revenue_is_critical() {
        let mut raw = full_statement();
        raw.income_statement
            .insert("Total Revenue".to_string(), Decimal::ZERO);
        let err = resolve_statement(&raw).unwrap_err();
        assert!(matches!(err, HealthError::CriticalFieldMissing { .. }));
    }

    #[test]
    fn test_nulls_are_dropped() {
        let json = r#"{
            "balance_sheet": {"Total Assets": null, "TotalAssets": 1000},
            "income_statement": {"Total Revenue": 400}
        }"#;
        let raw: RawStatement = serde_json::from_str(json).unwrap();
        let resolutions = resolve_fields(&raw);
        let ta = resolutions.get(FinancialField::TotalAssets).unwrap();
        assert_eq!(ta.value, dec!(1000));
        assert_eq!(ta.matched_alias.as_deref(), Some("TotalAssets"));
    }
}
