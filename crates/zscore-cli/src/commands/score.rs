use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use zscore_core::benchmark::relative_position;
use zscore_core::scoring::{analyze_record, FinancialRecord};

use super::benchmark::{build_benchmark, load_provider};
use crate::config::AppConfig;
use crate::input;

/// Arguments for scoring a single company
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScoreArgs {
    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Retained earnings (may be negative)
    #[arg(long)]
    pub retained_earnings: Option<Decimal>,

    /// Earnings before interest and taxes (may be negative)
    #[arg(long)]
    pub ebit: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Market value of equity (stockholders' equity as proxy)
    #[arg(long, alias = "mve")]
    pub market_value_equity: Option<Decimal>,

    /// Total revenue
    #[arg(long, alias = "revenue")]
    pub total_revenue: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Also benchmark against this curated industry
    #[arg(long, conflicts_with = "peers", requires = "statements")]
    pub industry: Option<String>,

    /// Also benchmark against these comma-separated tickers
    #[arg(long, requires = "statements")]
    pub peers: Option<String>,

    /// Statements file backing the benchmark
    #[arg(long)]
    pub statements: Option<String>,
}

pub fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let record: FinancialRecord = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(record) = input::stdin::read_stdin()? {
        record
    } else {
        FinancialRecord {
            total_assets: args
                .total_assets
                .ok_or("--total-assets is required (or provide --input)")?,
            current_assets: args
                .current_assets
                .ok_or("--current-assets is required (or provide --input)")?,
            current_liabilities: args
                .current_liabilities
                .ok_or("--current-liabilities is required (or provide --input)")?,
            retained_earnings: args
                .retained_earnings
                .ok_or("--retained-earnings is required (or provide --input)")?,
            ebit: args.ebit.ok_or("--ebit is required (or provide --input)")?,
            total_liabilities: args
                .total_liabilities
                .ok_or("--total-liabilities is required (or provide --input)")?,
            market_value_equity: args
                .market_value_equity
                .ok_or("--market-value-equity is required (or provide --input)")?,
            total_revenue: args
                .total_revenue
                .ok_or("--total-revenue is required (or provide --input)")?,
        }
    };

    let analysis = analyze_record(&record)?;

    let Some(ref statements) = args.statements else {
        return Ok(serde_json::to_value(analysis)?);
    };
    let provider = load_provider(statements, config)?;
    let Some(benchmark) = build_benchmark(
        args.industry.as_deref(),
        args.peers.as_deref(),
        &provider,
        config,
    ) else {
        return Ok(serde_json::to_value(analysis)?);
    };

    let mut value = serde_json::to_value(&analysis)?;
    match benchmark {
        Ok(out) => {
            let position = relative_position(analysis.result.score.z_score, &out.result);
            value["benchmark"] = serde_json::to_value(&out.result)?;
            value["relative_position"] = Value::String(position.label().to_string());
            append_warnings(&mut value, out.warnings);
        }
        // A failed benchmark still leaves the company's own score usable.
        Err(e) => append_warnings(&mut value, vec![format!("Benchmark unavailable: {e}")]),
    }
    Ok(value)
}

fn append_warnings(value: &mut Value, extra: Vec<String>) {
    if let Some(Value::Array(warnings)) = value.get_mut("warnings") {
        warnings.extend(extra.into_iter().map(Value::String));
    }
}
