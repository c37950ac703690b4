//! Watchlist price snapshots and the providers that fill them.

mod coincap;
mod coingecko;

pub use coincap::{CoinCapProvider, DEFAULT_ASSETS_URL};
pub use coingecko::{CoingeckoProvider, DEFAULT_SIMPLE_PRICE_URL};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Which public listing backs the price feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriceSource {
    #[default]
    CoinCap,
    Coingecko,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::CoinCap => write!(f, "coincap"),
            PriceSource::Coingecko => write!(f, "coingecko"),
        }
    }
}

/// Latest USD prices for the watchlist. Keys always cover the full
/// watchlist; a `None` price means the source did not report that symbol.
#[derive(Debug, Clone)]
pub struct PriceSnapshot {
    prices: HashMap<String, Option<f64>>,
    pub as_of: DateTime<Utc>,
    /// Set when the snapshot was served in place of a failed fetch, either
    /// from an earlier success or as the initial all-None one.
    pub stale: bool,
}

impl PriceSnapshot {
    /// All-None snapshot for a watchlist with no successful fetch yet.
    pub fn empty(watchlist: &[String]) -> Self {
        Self {
            prices: watchlist.iter().map(|s| (s.clone(), None)).collect(),
            as_of: Utc::now(),
            stale: true,
        }
    }

    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied().flatten()
    }
}

/// One listing call per refresh, folded into a watchlist-aligned map.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Source tag shown in the chart header.
    fn name(&self) -> &'static str;

    async fn fetch_usd(&self, watchlist: &[String]) -> Result<HashMap<String, Option<f64>>>;
}

/// Fold raw `(symbol, price)` records into a watchlist-aligned map.
/// Record symbols are uppercased before matching; a later record for the
/// same symbol overwrites an earlier one; watchlist symbols absent from
/// the records come out as `None`.
pub(crate) fn align_prices(
    records: impl IntoIterator<Item = (String, Option<f64>)>,
    watchlist: &[String],
) -> HashMap<String, Option<f64>> {
    let mut map: HashMap<String, Option<f64>> =
        watchlist.iter().map(|s| (s.clone(), None)).collect();
    for (symbol, price) in records {
        let symbol = symbol.to_ascii_uppercase();
        if let Some(slot) = map.get_mut(&symbol) {
            *slot = price;
        }
    }
    map
}

/// Owns the provider and the last good snapshot. Every fetch failure is
/// downgraded: the stored snapshot is served stale, or the all-None one
/// before any success. No retries, no backoff.
pub struct PriceFeed {
    provider: Arc<dyn PriceProvider>,
    watchlist: Vec<String>,
    last: Option<PriceSnapshot>,
}

impl PriceFeed {
    pub fn new(provider: Arc<dyn PriceProvider>, watchlist: Vec<String>) -> Self {
        Self {
            provider,
            watchlist,
            last: None,
        }
    }

    pub fn source(&self) -> &'static str {
        self.provider.name()
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    /// Fetch once and replace the stored snapshot wholesale. On failure
    /// the stored snapshot stays untouched and a stale copy is returned.
    pub async fn refresh(&mut self) -> PriceSnapshot {
        match self.provider.fetch_usd(&self.watchlist).await {
            Ok(prices) => {
                let snapshot = PriceSnapshot {
                    prices,
                    as_of: Utc::now(),
                    stale: false,
                };
                self.last = Some(snapshot.clone());
                snapshot
            }
            Err(err) => {
                warn!(
                    "{} fetch failed, serving last snapshot: {err:#}",
                    self.provider.name()
                );
                match &self.last {
                    Some(prev) => {
                        let mut snapshot = prev.clone();
                        snapshot.stale = true;
                        snapshot
                    }
                    None => PriceSnapshot::empty(&self.watchlist),
                }
            }
        }
    }

    /// Latest stored snapshot without fetching; ask and select paths
    /// render from this.
    pub fn snapshot(&self) -> PriceSnapshot {
        match &self.last {
            Some(prev) => prev.clone(),
            None => PriceSnapshot::empty(&self.watchlist),
        }
    }
}
