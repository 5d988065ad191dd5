//! Peer benchmark aggregation.
//!
//! Peers are fetched and scored one at a time, in input order. A failure for
//! one peer is recorded and skipped; statistics are computed over the peers
//! that produced a finite score.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::peers::{parse_ticker_list, Industry};
use super::provider::PeerScorer;
use crate::scoring::altman::ScoreResult;
use crate::{types::*, HealthError, HealthResult};

const CUSTOM_SOURCE_LABEL: &str = "Custom Comparison";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Peers taken from the head of an industry list.
    pub max_companies: usize,
    /// Custom benchmarks fail below this many successful peers.
    pub min_custom_peers: usize,
    /// Industry benchmarks warn below this many successful peers.
    pub industry_warn_below: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            max_companies: 8,
            min_custom_peers: 2,
            industry_warn_below: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// What happened to one peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeerOutcome {
    Scored {
        ticker: String,
        z_score: Decimal,
        liabilities_substituted: bool,
    },
    /// Fetch failed or the statement lacked a critical field.
    Skipped { ticker: String, reason: String },
    /// Scoring overflowed; excluded from statistics.
    NonFinite { ticker: String, reason: String },
}

impl PeerOutcome {
    pub fn ticker(&self) -> &str {
        match self {
            Self::Scored { ticker, .. }
            | Self::Skipped { ticker, .. }
            | Self::NonFinite { ticker, .. } => ticker,
        }
    }

    pub fn z_score(&self) -> Option<Decimal> {
        match self {
            Self::Scored { z_score, .. } => Some(*z_score),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    pub count: usize,
    pub mean: Decimal,
    pub median: Decimal,
    /// 75th percentile.
    pub top_quartile: Decimal,
    /// 25th percentile.
    pub bottom_quartile: Decimal,
}

/// Peer statistics for one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmark {
    /// Industry name, or "Custom Comparison".
    pub source: String,
    pub count: usize,
    /// Peers that contributed a score. Custom benchmarks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companies: Option<Vec<String>>,
    pub mean: Decimal,
    pub median: Decimal,
    pub top_quartile: Decimal,
    pub bottom_quartile: Decimal,
    pub scores: Vec<Decimal>,
    pub outcomes: Vec<PeerOutcome>,
}

/// Where a company's score sits within a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativePosition {
    TopQuartile,
    AboveAverage,
    BelowAverage,
    BottomQuartile,
}

impl RelativePosition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopQuartile => "Top 25%",
            Self::AboveAverage => "Above Avg",
            Self::BelowAverage => "Below Avg",
            Self::BottomQuartile => "Bottom 25%",
        }
    }
}

impl std::fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Observer for long-running peer loops. Both hooks default to no-ops.
pub trait ProgressObserver {
    fn on_fetch(&mut self, _index: usize, _total: usize, _ticker: &str) {}
    fn on_outcome(&mut self, _index: usize, _total: usize, _outcome: &PeerOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score each ticker in order, isolating failures per peer.
pub fn aggregate_peers<S: PeerScorer + ?Sized>(
    tickers: &[String],
    scorer: &S,
    progress: &mut dyn ProgressObserver,
) -> Vec<PeerOutcome> {
    let total = tickers.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, ticker) in tickers.iter().enumerate() {
        progress.on_fetch(index, total, ticker);

        let outcome = match scorer.score_peer(ticker) {
            Ok(score) => scored(ticker, &score),
            Err(HealthError::NonFiniteScore { context }) => {
                tracing::warn!(%ticker, %context, "non-finite peer score excluded");
                PeerOutcome::NonFinite {
                    ticker: ticker.clone(),
                    reason: context,
                }
            }
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "peer skipped");
                PeerOutcome::Skipped {
                    ticker: ticker.clone(),
                    reason: e.to_string(),
                }
            }
        };

        progress.on_outcome(index, total, &outcome);
        outcomes.push(outcome);
    }

    outcomes
}

/// Count, mean, median and quartiles of a non-empty score set.
///
/// Percentiles interpolate linearly between closest ranks. Scores near the
/// edge of the decimal range are summarised without overflowing; any
/// arithmetic that still cannot be represented is `NonFiniteScore`.
pub fn summarize(scores: &[Decimal]) -> HealthResult<BenchmarkStats> {
    if scores.is_empty() {
        return Err(HealthError::InsufficientData(
            "At least one peer score is required.".into(),
        ));
    }

    let count = scores.len();
    let mean = mean(scores)?;

    let mut sorted = scores.to_vec();
    sorted.sort();

    Ok(BenchmarkStats {
        count,
        mean,
        median: percentile(&sorted, dec!(50))?,
        top_quartile: percentile(&sorted, dec!(75))?,
        bottom_quartile: percentile(&sorted, dec!(25))?,
    })
}

/// Benchmark against a curated industry peer list.
///
/// Unknown industry names fall back to the Manufacturing peer list but keep
/// the caller's name as the benchmark label, with a warning. Fewer successful
/// peers than `industry_warn_below` produces a warning, not a failure; zero
/// successful peers is a failure.
pub fn industry_benchmark<S: PeerScorer + ?Sized>(
    industry: &str,
    scorer: &S,
    config: &BenchmarkConfig,
    progress: &mut dyn ProgressObserver,
) -> HealthResult<ComputationOutput<Benchmark>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let resolved = Industry::from_name_or_default(industry);
    let label = match Industry::from_name(industry) {
        Some(known) => known.name().to_string(),
        None => {
            warnings.push(format!(
                "Unknown industry '{industry}'; using {resolved} peers."
            ));
            industry.trim().to_string()
        }
    };

    let tickers: Vec<String> = resolved
        .tickers()
        .iter()
        .take(config.max_companies)
        .map(|t| t.to_string())
        .collect();

    tracing::info!(industry = %label, peers = tickers.len(), "industry benchmark");
    let outcomes = aggregate_peers(&tickers, scorer, progress);
    let scores = successful_scores(&outcomes);

    if scores.len() < config.industry_warn_below {
        tracing::warn!(count = scores.len(), "thin industry benchmark");
        warnings.push(format!(
            "Only {} companies fetched successfully",
            scores.len()
        ));
    }
    if scores.is_empty() {
        return Err(HealthError::InsufficientData(format!(
            "No {label} peers could be scored."
        )));
    }
    warnings.extend(substitution_warnings(&outcomes));

    let stats = summarize(&scores)?;
    let benchmark = build_benchmark(&label, None, stats, scores, outcomes);

    let assumptions = serde_json::json!({
        "peer_source": "curated industry list",
        "industry": label,
        "peer_list": resolved.name(),
        "max_companies": config.max_companies,
        "percentiles": "linear interpolation",
    });

    Ok(with_metadata(
        "Altman Z-Score industry benchmark",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        benchmark,
    ))
}

/// Benchmark against user-supplied tickers (comma-separated).
///
/// Fails with no benchmark when fewer than `min_custom_peers` peers score.
pub fn custom_benchmark<S: PeerScorer + ?Sized>(
    ticker_list: &str,
    scorer: &S,
    config: &BenchmarkConfig,
    progress: &mut dyn ProgressObserver,
) -> HealthResult<ComputationOutput<Benchmark>> {
    let start = Instant::now();

    let tickers = parse_ticker_list(ticker_list);
    if tickers.is_empty() {
        return Err(HealthError::InvalidInput {
            field: "tickers".into(),
            reason: "Enter at least one competitor ticker.".into(),
        });
    }

    tracing::info!(peers = tickers.len(), "custom benchmark");
    let outcomes = aggregate_peers(&tickers, scorer, progress);
    let scores = successful_scores(&outcomes);

    if scores.len() < config.min_custom_peers {
        return Err(HealthError::InsufficientData(format!(
            "Only {} companies fetched. Need at least {} for benchmark.",
            scores.len(),
            config.min_custom_peers
        )));
    }

    let companies: Vec<String> = outcomes
        .iter()
        .filter(|o| o.z_score().is_some())
        .map(|o| o.ticker().to_string())
        .collect();
    tracing::info!(
        count = companies.len(),
        companies = %companies.join(", "),
        "benchmark created"
    );

    let warnings = substitution_warnings(&outcomes);
    let stats = summarize(&scores)?;
    let benchmark = build_benchmark(
        CUSTOM_SOURCE_LABEL,
        Some(companies),
        stats,
        scores,
        outcomes,
    );

    let assumptions = serde_json::json!({
        "peer_source": "user-supplied tickers",
        "min_custom_peers": config.min_custom_peers,
        "percentiles": "linear interpolation",
    });

    Ok(with_metadata(
        "Altman Z-Score custom benchmark",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        benchmark,
    ))
}

/// Place a score against benchmark quartiles.
pub fn relative_position(z_score: Decimal, benchmark: &Benchmark) -> RelativePosition {
    if z_score >= benchmark.top_quartile {
        RelativePosition::TopQuartile
    } else if z_score >= benchmark.median {
        RelativePosition::AboveAverage
    } else if z_score >= benchmark.bottom_quartile {
        RelativePosition::BelowAverage
    } else {
        RelativePosition::BottomQuartile
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn scored(ticker: &str, score: &ScoreResult) -> PeerOutcome {
    PeerOutcome::Scored {
        ticker: ticker.to_string(),
        z_score: score.z_score,
        liabilities_substituted: score.liabilities_substituted,
    }
}

fn successful_scores(outcomes: &[PeerOutcome]) -> Vec<Decimal> {
    outcomes.iter().filter_map(PeerOutcome::z_score).collect()
}

fn substitution_warnings(outcomes: &[PeerOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            PeerOutcome::Scored {
                ticker,
                liabilities_substituted: true,
                ..
            } => Some(format!(
                "{ticker}: total liabilities missing; X4 uses a denominator of 1."
            )),
            _ => None,
        })
        .collect()
}

fn build_benchmark(
    source: &str,
    companies: Option<Vec<String>>,
    stats: BenchmarkStats,
    scores: Vec<Decimal>,
    outcomes: Vec<PeerOutcome>,
) -> Benchmark {
    Benchmark {
        source: source.to_string(),
        count: stats.count,
        companies,
        mean: stats.mean,
        median: stats.median,
        top_quartile: stats.top_quartile,
        bottom_quartile: stats.bottom_quartile,
        scores,
        outcomes,
    }
}

fn stats_overflow(context: &str) -> HealthError {
    HealthError::NonFiniteScore {
        context: format!("benchmark {context}"),
    }
}

/// Exact sum / n when the sum fits; otherwise the sum of per-score shares,
/// which stays within the range of the inputs.
fn mean(scores: &[Decimal]) -> HealthResult<Decimal> {
    let n = Decimal::from(scores.len() as u64);
    let exact = scores
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(*s));
    if let Some(sum) = exact {
        return Ok(sum / n);
    }
    scores
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.checked_div(n)?))
        .ok_or_else(|| stats_overflow("mean"))
}

/// Compute percentile using linear interpolation.
///
/// Interpolated as `lower * (1 - f) + upper * f`, which never leaves the
/// `[lower, upper]` interval, so distant neighbours cannot overflow.
fn percentile(sorted: &[Decimal], p: Decimal) -> HealthResult<Decimal> {
    if sorted.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if sorted.len() == 1 {
        return Ok(sorted[0]);
    }
    let n = Decimal::from(sorted.len() as u64);
    let rank = p / dec!(100) * (n - Decimal::ONE);

    let lower_idx = rank
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(sorted.len() - 1);
    let upper_idx = (lower_idx + 1).min(sorted.len() - 1);
    let fraction = rank - Decimal::from(lower_idx as u64);

    let (lower, upper) = (sorted[lower_idx], sorted[upper_idx]);
    if fraction.is_zero() || lower == upper {
        return Ok(lower);
    }
    let lower_share = lower
        .checked_mul(Decimal::ONE - fraction)
        .ok_or_else(|| stats_overflow("percentile"))?;
    let upper_share = upper
        .checked_mul(fraction)
        .ok_or_else(|| stats_overflow("percentile"))?;
    lower_share
        .checked_add(upper_share)
        .ok_or_else(|| stats_overflow("percentile"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
