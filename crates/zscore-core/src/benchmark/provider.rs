//! The statement-fetch seam and its decorators.
//!
//! Market-data retrieval lives outside this crate. Callers plug a
//! [`StatementProvider`] in; [`CachedProvider`] adds time-bounded memoisation
//! of successful fetches and [`StatementScorer`] turns any provider into a
//! per-peer fetch-and-score capability.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::scoring::altman::{calculate_z_score, ScoreResult};
use crate::statements::resolver::{resolve_statement, RawStatement};
use crate::{HealthError, HealthResult};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Fetch a company's latest-period statement fields by ticker.
///
/// Implementations may fail, and may return partial data; resolution decides
/// whether the result is usable.
pub trait StatementProvider {
    fn fetch_statement(&self, ticker: &str) -> HealthResult<RawStatement>;
}

impl<P: StatementProvider + ?Sized> StatementProvider for &P {
    fn fetch_statement(&self, ticker: &str) -> HealthResult<RawStatement> {
        (**self).fetch_statement(ticker)
    }
}

impl<P: StatementProvider + ?Sized> StatementProvider for Box<P> {
    fn fetch_statement(&self, ticker: &str) -> HealthResult<RawStatement> {
        (**self).fetch_statement(ticker)
    }
}

/// Produce a Z-Score for one peer, or the reason it could not be scored.
pub trait PeerScorer {
    fn score_peer(&self, ticker: &str) -> HealthResult<ScoreResult>;
}

impl<F> PeerScorer for F
where
    F: Fn(&str) -> HealthResult<ScoreResult>,
{
    fn score_peer(&self, ticker: &str) -> HealthResult<ScoreResult> {
        self(ticker)
    }
}

/// Fetch → resolve → score, over any provider.
#[derive(Debug, Clone)]
pub struct StatementScorer<P> {
    provider: P,
}

impl<P: StatementProvider> StatementScorer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: StatementProvider> PeerScorer for StatementScorer<P> {
    fn score_peer(&self, ticker: &str) -> HealthResult<ScoreResult> {
        let raw = self.provider.fetch_statement(ticker)?;
        let resolved = resolve_statement(&raw)?;
        calculate_z_score(&resolved.record)
    }
}

// ---------------------------------------------------------------------------
// In-memory provider
// ---------------------------------------------------------------------------

/// Statements held in memory, keyed by upper-cased ticker.
///
/// Backs file-driven runs and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    from = "HashMap<String, RawStatement>",
    into = "HashMap<String, RawStatement>"
)]
pub struct InMemoryProvider {
    statements: HashMap<String, RawStatement>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "TICKER": { "balance_sheet": {..}, "income_statement": {..} } }` map.
    pub fn from_json(json: &str) -> HealthResult<Self> {
        let raw: HashMap<String, RawStatement> = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    pub fn insert(&mut self, ticker: &str, statement: RawStatement) {
        self.statements.insert(ticker.trim().to_uppercase(), statement);
    }

    pub fn with_statement(mut self, ticker: &str, statement: RawStatement) -> Self {
        self.insert(ticker, statement);
        self
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl FromIterator<(String, RawStatement)> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = (String, RawStatement)>>(iter: I) -> Self {
        let mut provider = Self::new();
        for (ticker, statement) in iter {
            provider.insert(&ticker, statement);
        }
        provider
    }
}

impl From<HashMap<String, RawStatement>> for InMemoryProvider {
    fn from(raw: HashMap<String, RawStatement>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<InMemoryProvider> for HashMap<String, RawStatement> {
    fn from(provider: InMemoryProvider) -> Self {
        provider.statements
    }
}

impl StatementProvider for InMemoryProvider {
    fn fetch_statement(&self, ticker: &str) -> HealthResult<RawStatement> {
        self.statements
            .get(&ticker.trim().to_uppercase())
            .cloned()
            .ok_or_else(|| HealthError::Provider {
                ticker: ticker.to_string(),
                reason: "no statement data available".into(),
            })
    }
}

// ---------------------------------------------------------------------------
// Caching decorator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a cached statement, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

struct CacheEntry {
    statement: RawStatement,
    cached_at: DateTime<Utc>,
}

/// Memoises successful fetches per ticker for a fixed TTL. Failures are not
/// cached.
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    cache: DashMap<String, CacheEntry>,
}

impl<P: StatementProvider> CachedProvider<P> {
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let secs = i64::try_from(config.ttl_secs).unwrap_or(i64::MAX);
        Self::with_ttl(inner, Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: DashMap::new(),
        }
    }

    pub fn invalidate(&self, ticker: &str) {
        self.cache.remove(&cache_key(ticker));
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn cached(&self, key: &str) -> Option<RawStatement> {
        let entry = self.cache.get(key)?;
        if Utc::now() - entry.cached_at < self.ttl {
            Some(entry.statement.clone())
        } else {
            None
        }
    }
}

impl<P: StatementProvider> StatementProvider for CachedProvider<P> {
    fn fetch_statement(&self, ticker: &str) -> HealthResult<RawStatement> {
        let key = cache_key(ticker);
        if let Some(statement) = self.cached(&key) {
            tracing::debug!(ticker = %key, "statement cache hit");
            return Ok(statement);
        }

        let statement = self.inner.fetch_statement(ticker)?;
        self.cache.insert(
            key,
            CacheEntry {
                statement: statement.clone(),
                cached_at: Utc::now(),
            },
        );
        Ok(statement)
    }
}

fn cache_key(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
