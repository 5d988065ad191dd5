//! Data-quality report derived from field resolution.

use serde::{Deserialize, Serialize};

use super::fields::FinancialField;
use super::resolver::FieldResolutions;
use crate::types::Money;

/// Confidence banding driven by the number of missing quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataQuality {
    /// All eight quantities found.
    Complete,
    /// One or two non-critical quantities missing.
    ReducedConfidence,
    /// Three or more missing.
    Unreliable,
}

impl DataQuality {
    pub fn from_missing_count(missing: usize) -> Self {
        match missing {
            0 => Self::Complete,
            1 | 2 => Self::ReducedConfidence,
            _ => Self::Unreliable,
        }
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "Complete"),
            Self::ReducedConfidence => write!(f, "Reduced Confidence"),
            Self::Unreliable => write!(f, "Unreliable"),
        }
    }
}

/// One row of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub field: FinancialField,
    pub label: String,
    pub found: bool,
    pub value: Money,
    /// Provider label the value came from; `None` when missing.
    pub field_name_used: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub ticker: String,
    pub entries: Vec<DiagnosticEntry>,
    pub missing_count: usize,
    pub quality: DataQuality,
    pub summary: String,
}

/// Summarise which quantities were found, and via which alias.
pub fn build_report(ticker: &str, resolutions: &FieldResolutions) -> DataQualityReport {
    let entries: Vec<DiagnosticEntry> = resolutions
        .iter()
        .map(|r| DiagnosticEntry {
            field: r.field,
            label: r.field.label().to_string(),
            found: r.found,
            value: r.value,
            field_name_used: r.matched_alias.clone(),
        })
        .collect();

    let missing_count = entries.iter().filter(|e| !e.found).count();
    let quality = DataQuality::from_missing_count(missing_count);

    let summary = match quality {
        DataQuality::Complete => format!(
            "All {} required fields found for {ticker}",
            FinancialField::ALL.len()
        ),
        DataQuality::ReducedConfidence => format!(
            "{missing_count} field(s) missing for {ticker}. Z-score may be less accurate."
        ),
        DataQuality::Unreliable => format!(
            "{missing_count} field(s) missing for {ticker}. Z-score calculation may be unreliable."
        ),
    };

    DataQualityReport {
        ticker: ticker.to_string(),
        entries,
        missing_count,
        quality,
        summary,
    }
}
