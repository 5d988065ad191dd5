use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use zscore_core::benchmark::{
    custom_benchmark, industry_benchmark, relative_position, BenchmarkConfig, CacheConfig,
    CachedProvider, InMemoryProvider, NoProgress, PeerOutcome, ProgressObserver,
    RelativePosition, StatementScorer,
};
use zscore_core::HealthError;

// ===========================================================================
// Fixtures
// ===========================================================================

// Z == revenue / total assets when every other input is absent.
fn statement(revenue: u64) -> serde_json::Value {
    json!({
        "balance_sheet": { "Total Assets": 1000, "Total Liabilities": 500 },
        "income_statement": { "Total Revenue": revenue }
    })
}

// No liabilities label, so X4 divides by the substituted 1 and the sum
// overflows.
fn overflowing_statement() -> serde_json::Value {
    json!({
        "balance_sheet": {
            "Total Assets": 1,
            "Common Stock Equity": "79228162514264337593543950335"
        },
        "income_statement": { "Total Revenue": "79228162514264337593543950335" }
    })
}

/// Technology peers are AAPL, MSFT, GOOGL, META, NVDA, AMD, INTC, ORCL.
/// META and AMD are absent, INTC overflows.
fn technology_provider() -> InMemoryProvider {
    let statements = json!({
        "AAPL": statement(1000),
        "MSFT": statement(2000),
        "GOOGL": statement(3000),
        "NVDA": statement(4000),
        "INTC": overflowing_statement(),
        "ORCL": statement(5000)
    });
    InMemoryProvider::from_json(&statements.to_string()).unwrap()
}

#[derive(Default)]
struct Tally {
    fetched: usize,
    scored: usize,
    skipped: usize,
    non_finite: usize,
}

impl ProgressObserver for Tally {
    fn on_fetch(&mut self, _index: usize, _total: usize, _ticker: &str) {
        self.fetched += 1;
    }

    fn on_outcome(&mut self, _index: usize, _total: usize, outcome: &PeerOutcome) {
        match outcome {
            PeerOutcome::Scored { .. } => self.scored += 1,
            PeerOutcome::Skipped { .. } => self.skipped += 1,
            PeerOutcome::NonFinite { .. } => self.non_finite += 1,
        }
    }
}

// ===========================================================================
// Industry benchmarks
// ===========================================================================

#[test]
fn test_industry_benchmark_excludes_failures() {
    let scorer = StatementScorer::new(technology_provider());
    let mut tally = Tally::default();
    let out = industry_benchmark("technology", &scorer, &BenchmarkConfig::default(), &mut tally)
        .unwrap();
    let b = &out.result;

    assert_eq!(tally.fetched, 8);
    assert_eq!(tally.skipped, 2);
    assert_eq!(tally.non_finite, 1);
    assert_eq!(tally.scored, 5);

    assert_eq!(b.source, "Technology");
    assert_eq!(b.count, 5);
    assert_eq!(b.scores, vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
    assert_eq!(b.mean, dec!(3));
    assert_eq!(b.median, dec!(3));
    assert_eq!(b.top_quartile, dec!(4));
    assert_eq!(b.bottom_quartile, dec!(2));
    assert_eq!(b.outcomes.len(), 8);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_benchmark_through_cache() {
    let cached = CachedProvider::new(technology_provider(), &CacheConfig::default());
    let scorer = StatementScorer::new(&cached);
    let config = BenchmarkConfig::default();

    let first = industry_benchmark("Technology", &scorer, &config, &mut NoProgress).unwrap();
    assert_eq!(cached.cached_count(), 6);

    let second = industry_benchmark("Technology", &scorer, &config, &mut NoProgress).unwrap();
    assert_eq!(first.result.scores, second.result.scores);
}

// ===========================================================================
// Custom benchmarks
// ===========================================================================

#[test]
fn test_custom_benchmark_with_one_success_fails() {
    let scorer = StatementScorer::new(technology_provider());
    let err = custom_benchmark("aapl, meta, amd", &scorer, &BenchmarkConfig::default(), &mut NoProgress)
        .unwrap_err();
    assert!(matches!(err, HealthError::InsufficientData(_)));
}

#[test]
fn test_custom_benchmark_position() {
    let scorer = StatementScorer::new(technology_provider());
    let out = custom_benchmark(
        "AAPL, msft, ,GOOGL",
        &scorer,
        &BenchmarkConfig::default(),
        &mut NoProgress,
    )
    .unwrap();
    let b = &out.result;

    assert_eq!(b.source, "Custom Comparison");
    assert_eq!(
        b.companies,
        Some(vec!["AAPL".to_string(), "MSFT".to_string(), "GOOGL".to_string()])
    );
    assert_eq!(b.mean, dec!(2));
    assert_eq!(relative_position(dec!(5.155), b), RelativePosition::TopQuartile);
    assert_eq!(relative_position(dec!(1.2), b), RelativePosition::BottomQuartile);
}

#[test]
fn test_custom_benchmark_with_distant_extremes() {
    // Both peers score finitely, but their spread exceeds the decimal range.
    let statements = json!({
        "LOW": {
            "balance_sheet": {
                "Total Assets": 1,
                "Total Liabilities": 1,
                "Retained Earnings": "-50000000000000000000000000000"
            },
            "income_statement": { "Total Revenue": 1 }
        },
        "HIGH": {
            "balance_sheet": {
                "Total Assets": 1,
                "Common Stock Equity": "50000000000000000000000000000"
            },
            "income_statement": { "Total Revenue": 1 }
        }
    });
    let provider = InMemoryProvider::from_json(&statements.to_string()).unwrap();
    let scorer = StatementScorer::new(provider);

    let out = custom_benchmark("LOW,HIGH", &scorer, &BenchmarkConfig::default(), &mut NoProgress)
        .unwrap();
    let b = &out.result;

    assert_eq!(b.count, 2);
    assert!(b.scores[0] < dec!(-60_000_000_000_000_000_000_000_000_000));
    assert!(b.scores[1] > dec!(20_000_000_000_000_000_000_000_000_000));
    assert!(b.bottom_quartile < b.median);
    assert!(b.median < b.top_quartile);
    assert!(b.mean < dec!(0));
}
