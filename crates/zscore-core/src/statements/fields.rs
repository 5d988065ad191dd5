//! Static alias tables for the eight Altman inputs.
//!
//! Providers and accounting standards label the same quantity differently.
//! Each [`FinancialField`] owns an ordered alias list; earlier entries take
//! precedence during resolution.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alias tables
// ---------------------------------------------------------------------------

const TOTAL_ASSETS_ALIASES: &[&str] = &["Total Assets", "TotalAssets"];

const CURRENT_ASSETS_ALIASES: &[&str] = &["Current Assets", "CurrentAssets"];

const CURRENT_LIABILITIES_ALIASES: &[&str] = &["Current Liabilities", "CurrentLiabilities"];

const RETAINED_EARNINGS_ALIASES: &[&str] = &[
    "Retained Earnings",
    "RetainedEarnings",
    "Accumulated Deficit",
];

const EBIT_ALIASES: &[&str] = &[
    "EBIT",
    "Operating Income",
    "OperatingIncome",
    "Earnings Before Interest And Taxes",
];

// Net-of-minority-interest label wins over the generic one.
const TOTAL_LIABILITIES_ALIASES: &[&str] = &[
    "Total Liabilities Net Minority Interest",
    "Total Liabilities",
    "TotalLiabilities",
];

const MARKET_VALUE_EQUITY_ALIASES: &[&str] = &[
    "Common Stock Equity",
    "Stockholders Equity",
    "StockholdersEquity",
    "Total Equity Gross Minority Interest",
];

const TOTAL_REVENUE_ALIASES: &[&str] = &["Total Revenue", "TotalRevenue", "Revenue"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which statement a quantity is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
}

/// One of the eight quantities the Altman model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialField {
    TotalAssets,
    CurrentAssets,
    CurrentLiabilities,
    RetainedEarnings,
    Ebit,
    TotalLiabilities,
    MarketValueEquity,
    TotalRevenue,
}

impl FinancialField {
    /// All fields in record order.
    pub const ALL: [FinancialField; 8] = [
        FinancialField::TotalAssets,
        FinancialField::CurrentAssets,
        FinancialField::CurrentLiabilities,
        FinancialField::RetainedEarnings,
        FinancialField::Ebit,
        FinancialField::TotalLiabilities,
        FinancialField::MarketValueEquity,
        FinancialField::TotalRevenue,
    ];

    /// Snake-case key, matching the `FinancialRecord` field name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TotalAssets => "total_assets",
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
            Self::RetainedEarnings => "retained_earnings",
            Self::Ebit => "ebit",
            Self::TotalLiabilities => "total_liabilities",
            Self::MarketValueEquity => "market_value_equity",
            Self::TotalRevenue => "total_revenue",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalAssets => "Total Assets",
            Self::CurrentAssets => "Current Assets",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::RetainedEarnings => "Retained Earnings",
            Self::Ebit => "EBIT",
            Self::TotalLiabilities => "Total Liabilities",
            Self::MarketValueEquity => "Market Value of Equity",
            Self::TotalRevenue => "Total Revenue",
        }
    }

    pub fn statement(&self) -> StatementKind {
        match self {
            Self::Ebit | Self::TotalRevenue => StatementKind::IncomeStatement,
            _ => StatementKind::BalanceSheet,
        }
    }

    /// Ordered candidate labels, highest precedence first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::TotalAssets => TOTAL_ASSETS_ALIASES,
            Self::CurrentAssets => CURRENT_ASSETS_ALIASES,
            Self::CurrentLiabilities => CURRENT_LIABILITIES_ALIASES,
            Self::RetainedEarnings => RETAINED_EARNINGS_ALIASES,
            Self::Ebit => EBIT_ALIASES,
            Self::TotalLiabilities => TOTAL_LIABILITIES_ALIASES,
            Self::MarketValueEquity => MARKET_VALUE_EQUITY_ALIASES,
            Self::TotalRevenue => TOTAL_REVENUE_ALIASES,
        }
    }

    /// A missing critical field invalidates the whole record.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::TotalAssets | Self::TotalRevenue)
    }
}

impl std::fmt::Display for FinancialField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
