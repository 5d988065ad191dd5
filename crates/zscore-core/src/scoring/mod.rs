pub mod altman;
pub mod zones;

pub use altman::{analyze_record, calculate_z_score, FinancialRecord, ScoreResult, ZScoreAnalysis};
pub use zones::{classify, classify_zone, RiskZone, ZoneClassification};
