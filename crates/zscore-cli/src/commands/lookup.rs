use clap::Args;
use serde_json::{json, Value};

use zscore_core::benchmark::StatementProvider;
use zscore_core::scoring::analyze_record;
use zscore_core::statements::{build_report, resolve_fields};

use super::benchmark::load_provider;
use crate::config::AppConfig;

/// Arguments for a ticker lookup
#[derive(Args)]
pub struct LookupArgs {
    /// Company ticker (case-insensitive)
    pub ticker: String,

    /// JSON file mapping ticker to balance_sheet / income_statement
    #[arg(long)]
    pub statements: String,
}

pub fn run_lookup(args: LookupArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let ticker = args.ticker.trim().to_uppercase();
    let provider = load_provider(&args.statements, config)?;

    let raw = provider.fetch_statement(&ticker)?;
    let resolutions = resolve_fields(&raw);
    let report = build_report(&ticker, &resolutions);

    // Diagnostics are still useful when the record cannot be scored.
    let record = match resolutions.to_record() {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(%ticker, error = %e, "lookup could not be scored");
            return Err(format!("{e}\n{}", report.summary).into());
        }
    };
    let mut analysis = analyze_record(&record)?;
    if report.missing_count > 0 {
        analysis.warnings.push(report.summary.clone());
    }

    Ok(json!({
        "result": {
            "ticker": ticker,
            "z_score": analysis.result.score.z_score,
            "zone_label": analysis.result.zone_label,
            "recommendation": analysis.result.recommendation,
            "record": record,
            "score": analysis.result.score,
            "data_quality": report,
        },
        "methodology": analysis.methodology,
        "assumptions": analysis.assumptions,
        "warnings": analysis.warnings,
        "metadata": analysis.metadata,
    }))
}
