//! Curated industry peer sets and free-form ticker parsing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Manufacturing,
    Retail,
    Technology,
    Healthcare,
    FoodAndBeverage,
    Transportation,
    Energy,
    Finance,
    ConsumerGoods,
    Automotive,
    Telecommunications,
}

impl Industry {
    pub const ALL: [Industry; 11] = [
        Industry::Manufacturing,
        Industry::Retail,
        Industry::Technology,
        Industry::Healthcare,
        Industry::FoodAndBeverage,
        Industry::Transportation,
        Industry::Energy,
        Industry::Finance,
        Industry::ConsumerGoods,
        Industry::Automotive,
        Industry::Telecommunications,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Manufacturing => "Manufacturing",
            Self::Retail => "Retail",
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::FoodAndBeverage => "Food & Beverage",
            Self::Transportation => "Transportation",
            Self::Energy => "Energy",
            Self::Finance => "Finance",
            Self::ConsumerGoods => "Consumer Goods",
            Self::Automotive => "Automotive",
            Self::Telecommunications => "Telecommunications",
        }
    }

    pub fn tickers(&self) -> &'static [&'static str] {
        match self {
            Self::Manufacturing => &["F", "GM", "CAT", "DE", "BA", "GE", "MMM", "HON"],
            Self::Retail => &["WMT", "TGT", "COST", "HD", "LOW", "AMZN", "EBAY"],
            Self::Technology => &["AAPL", "MSFT", "GOOGL", "META", "NVDA", "AMD", "INTC", "ORCL"],
            Self::Healthcare => &["JNJ", "UNH", "PFE", "ABBV", "TMO", "ABT", "DHR", "BMY"],
            Self::FoodAndBeverage => &["KO", "PEP", "MCD", "SBUX", "KHC", "GIS", "K", "HSY"],
            Self::Transportation => &["UPS", "FDX", "UAL", "DAL", "AAL", "LUV", "NSC", "UNP"],
            Self::Energy => &["XOM", "CVX", "COP", "SLB", "EOG", "MPC", "PSX", "VLO"],
            Self::Finance => &["JPM", "BAC", "WFC", "C", "GS", "MS", "BLK", "SCHW"],
            Self::ConsumerGoods => &["PG", "KMB", "CL", "EL", "NKE", "LULU", "TJX", "ROST"],
            Self::Automotive => &["TSLA", "F", "GM", "TM", "HMC", "STLA", "RIVN"],
            Self::Telecommunications => &["T", "VZ", "TMUS", "CMCSA", "DIS", "NFLX"],
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.name().eq_ignore_ascii_case(wanted))
    }

    /// Unknown names fall back to Manufacturing.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Manufacturing)
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Split a comma-separated ticker string: trimmed, upper-cased, empty
/// entries dropped. Order and duplicates are preserved.
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect()
}
