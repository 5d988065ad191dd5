//! Risk-zone classification for the public-company Z-Score.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Scores strictly above this are Safe.
pub const SAFE_THRESHOLD: Decimal = dec!(2.99);
/// Scores strictly below this are Distress.
pub const DISTRESS_THRESHOLD: Decimal = dec!(1.81);

/// Ordered by underlying score: `Distress < Gray < Safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskZone {
    Distress,
    Gray,
    Safe,
}

impl RiskZone {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Safe => "Safe Zone",
            Self::Gray => "Gray Zone",
            Self::Distress => "Distress Zone",
        }
    }

    /// Stable tag for presentation layers (CSS class, table style, ...).
    pub fn class_tag(&self) -> &'static str {
        match self {
            Self::Safe => "safe-zone",
            Self::Gray => "gray-zone",
            Self::Distress => "distress-zone",
        }
    }

    /// 0 = lowest risk.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Gray => 1,
            Self::Distress => 2,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Safe => "Excellent financial health. Focus on strategic growth opportunities.",
            Self::Gray => "Moderate risk detected. Monitor liquidity and profitability closely.",
            Self::Distress => {
                "High distress risk. Immediate action needed to improve financial position."
            }
        }
    }
}

impl std::fmt::Display for RiskZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneClassification {
    pub zone: RiskZone,
    pub label: String,
    pub class_tag: String,
    pub severity: u8,
}

/// Map a score to its zone. Both boundaries belong to the Gray zone.
pub fn classify_zone(z_score: Decimal) -> RiskZone {
    if z_score > SAFE_THRESHOLD {
        RiskZone::Safe
    } else if z_score >= DISTRESS_THRESHOLD {
        RiskZone::Gray
    } else {
        RiskZone::Distress
    }
}

pub fn classify(z_score: Decimal) -> ZoneClassification {
    let zone = classify_zone(z_score);
    ZoneClassification {
        zone,
        label: zone.label().to_string(),
        class_tag: zone.class_tag().to_string(),
        severity: zone.severity(),
    }
}
