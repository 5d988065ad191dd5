use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use zscore_core::benchmark::{BenchmarkConfig, InMemoryProvider, NoProgress, StatementScorer};
use zscore_core::statements::{build_report, resolve_fields, RawStatement};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_z_score(input_json: String) -> NapiResult<String> {
    let input: zscore_core::scoring::FinancialRecord =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = zscore_core::scoring::analyze_record(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn classify_risk_zone(z_score: String) -> NapiResult<String> {
    let z: rust_decimal::Decimal = z_score.trim().parse().map_err(to_napi_error)?;
    let output = zscore_core::scoring::classify(z);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ResolveInput {
    #[serde(default)]
    ticker: String,
    statement: RawStatement,
}

/// Resolve labelled statement fields; returns the record (when scorable) and
/// the data-quality report.
#[napi]
pub fn resolve_statement(input_json: String) -> NapiResult<String> {
    let input: ResolveInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let resolutions = resolve_fields(&input.statement);
    let report = build_report(&input.ticker, &resolutions);
    let record = resolutions.to_record().ok();
    serde_json::to_string(&serde_json::json!({
        "record": record,
        "data_quality": report,
    }))
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

#[napi]
pub fn industry_benchmark(industry: String, statements_json: String) -> NapiResult<String> {
    let provider = InMemoryProvider::from_json(&statements_json).map_err(to_napi_error)?;
    let scorer = StatementScorer::new(provider);
    let output = zscore_core::benchmark::industry_benchmark(
        &industry,
        &scorer,
        &BenchmarkConfig::default(),
        &mut NoProgress,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn custom_benchmark(tickers: String, statements_json: String) -> NapiResult<String> {
    let provider = InMemoryProvider::from_json(&statements_json).map_err(to_napi_error)?;
    let scorer = StatementScorer::new(provider);
    let output = zscore_core::benchmark::custom_benchmark(
        &tickers,
        &scorer,
        &BenchmarkConfig::default(),
        &mut NoProgress,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
