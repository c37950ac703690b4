//! CoinGecko `simple/price` provider, the alternative listing.

use crate::market::PriceProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::collections::HashMap;

pub const DEFAULT_SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// CoinGecko-backed price provider.
/// Fetches spot prices in USD for the watchlist via `/simple/price`.
pub struct CoingeckoProvider {
    client: Client,
    base: Url,
}

/// CoinGecko keys its listing by coin id, not ticker. Unmapped symbols
/// simply come back without a price.
fn symbol_to_id(symbol: &str) -> Option<&'static str> {
    match symbol.to_ascii_uppercase().as_str() {
        // Majors
        "BTC" => Some("bitcoin"),
        "ETH" => Some("ethereum"),
        "BNB" => Some("binancecoin"),
        "SOL" => Some("solana"),
        "MATIC" => Some("matic-network"),
        "XRP" => Some("ripple"),
        "ADA" => Some("cardano"),
        "DOT" => Some("polkadot"),
        "LTC" => Some("litecoin"),
        "LINK" => Some("chainlink"),
        "AVAX" => Some("avalanche-2"),
        // Stables
        "USDT" => Some("tether"),
        "USDC" => Some("usd-coin"),
        _ => None,
    }
}

fn lookup_usd(parsed: &HashMap<String, HashMap<String, f64>>, symbol: &str) -> Option<f64> {
    let id = symbol_to_id(symbol)?;
    parsed.get(id)?.get("usd").copied()
}

impl CoingeckoProvider {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).context("coingecko: invalid simple-price URL")?;
        Ok(Self {
            client: Client::new(),
            base,
        })
    }
}

#[async_trait]
impl PriceProvider for CoingeckoProvider {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch_usd(&self, watchlist: &[String]) -> Result<HashMap<String, Option<f64>>> {
        let mut ids: Vec<&str> = Vec::new();
        for symbol in watchlist {
            if let Some(id) = symbol_to_id(symbol) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        // Nothing on the watchlist maps to a coin id; skip the call.
        if ids.is_empty() {
            return Ok(watchlist.iter().map(|s| (s.clone(), None)).collect());
        }

        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("vs_currencies", "usd");

        // Parse like: { "bitcoin": {"usd": 12345.6}, ... }
        let parsed: HashMap<String, HashMap<String, f64>> = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .context("coingecko: request failed")?
            .error_for_status()
            .context("coingecko: non-success status")?
            .json()
            .await
            .context("coingecko: malformed price payload")?;

        Ok(watchlist
            .iter()
            .map(|symbol| (symbol.clone(), lookup_usd(&parsed, symbol)))
            .collect())
    }
}
