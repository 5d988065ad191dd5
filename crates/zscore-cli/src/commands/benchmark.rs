use clap::Args;
use colored::Colorize;
use serde_json::Value;

use zscore_core::benchmark::{
    custom_benchmark, industry_benchmark, Benchmark, CachedProvider, InMemoryProvider,
    PeerOutcome, ProgressObserver, StatementScorer,
};
use zscore_core::{ComputationOutput, HealthResult};

use crate::config::AppConfig;
use crate::input;

/// Arguments for a peer benchmark
#[derive(Args)]
pub struct BenchmarkArgs {
    /// Curated industry name (e.g. "Technology", "Food & Beverage")
    #[arg(long, conflicts_with = "peers")]
    pub industry: Option<String>,

    /// Comma-separated competitor tickers (e.g. "AAPL, msft, GOOGL")
    #[arg(long)]
    pub peers: Option<String>,

    /// JSON file mapping ticker to balance_sheet / income_statement
    #[arg(long)]
    pub statements: String,
}

/// Statements file wrapped in the TTL cache.
pub type FileProvider = CachedProvider<InMemoryProvider>;

pub fn load_provider(
    path: &str,
    config: &AppConfig,
) -> Result<FileProvider, Box<dyn std::error::Error>> {
    let provider: InMemoryProvider = input::file::read_json(path)?;
    tracing::debug!(tickers = provider.len(), "statements loaded");
    Ok(CachedProvider::new(provider, &config.cache))
}

/// Progress lines on stderr, shown only when a person is watching.
pub struct StderrProgress {
    enabled: bool,
}

impl StderrProgress {
    pub fn new() -> Self {
        Self {
            enabled: atty::is(atty::Stream::Stderr),
        }
    }
}

impl Default for StderrProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for StderrProgress {
    fn on_fetch(&mut self, index: usize, total: usize, ticker: &str) {
        if self.enabled {
            eprintln!("{} {} ({}/{})", "Fetching".cyan(), ticker, index + 1, total);
        }
    }

    fn on_outcome(&mut self, _index: usize, _total: usize, outcome: &PeerOutcome) {
        if !self.enabled {
            return;
        }
        match outcome {
            PeerOutcome::Scored { .. } => {}
            PeerOutcome::Skipped { ticker, reason } | PeerOutcome::NonFinite { ticker, reason } => {
                eprintln!("  {} {}: {}", "skipped".yellow(), ticker, reason)
            }
        }
    }
}

/// Run whichever benchmark the flags ask for. `None` when neither is set.
pub fn build_benchmark(
    industry: Option<&str>,
    peers: Option<&str>,
    provider: &FileProvider,
    config: &AppConfig,
) -> Option<HealthResult<ComputationOutput<Benchmark>>> {
    let scorer = StatementScorer::new(provider);
    let mut progress = StderrProgress::new();

    if let Some(list) = peers {
        Some(custom_benchmark(list, &scorer, &config.benchmark, &mut progress))
    } else {
        industry.map(|name| industry_benchmark(name, &scorer, &config.benchmark, &mut progress))
    }
}

pub fn run_benchmark(
    args: BenchmarkArgs,
    config: &AppConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let provider = load_provider(&args.statements, config)?;
    let result = build_benchmark(
        args.industry.as_deref(),
        args.peers.as_deref(),
        &provider,
        config,
    )
    .ok_or("--industry <name> or --peers <tickers> is required")??;
    Ok(serde_json::to_value(result)?)
}
