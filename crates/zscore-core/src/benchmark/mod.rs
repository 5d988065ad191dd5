//! Peer-set benchmarking: curated peer lists, the external statement-fetch
//! seam, and aggregation of peer Z-Scores into summary statistics.

pub mod aggregator;
pub mod peers;
pub mod provider;

pub use aggregator::{
    aggregate_peers, custom_benchmark, industry_benchmark, relative_position, summarize,
    Benchmark, BenchmarkConfig, BenchmarkStats, NoProgress, PeerOutcome, ProgressObserver,
    RelativePosition,
};
pub use peers::{parse_ticker_list, Industry};
pub use provider::{
    CacheConfig, CachedProvider, InMemoryProvider, PeerScorer, StatementProvider,
    StatementScorer,
};
