//! CoinCap `/v2/assets` listing provider.

use crate::market::align_prices;
use crate::market::PriceProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_ASSETS_URL: &str = "https://api.coincap.io/v2/assets";

/// One page of the listing is plenty for a short watchlist.
const ASSET_LIMIT: u32 = 200;

pub struct CoinCapProvider {
    client: Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct AssetListing {
    data: Vec<AssetRecord>,
}

#[derive(Debug, Deserialize)]
struct AssetRecord {
    symbol: String,
    #[serde(rename = "priceUsd", default, deserialize_with = "de_price_usd")]
    price_usd: Option<f64>,
}

/// `priceUsd` arrives as a decimal string, occasionally as a bare number
/// or null. Empty strings count as missing; junk strings are an error.
fn de_price_usd<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(price) => Ok(Some(price)),
            Err(_) => Err(de::Error::custom(format!("unparsable priceUsd: {s:?}"))),
        },
        Some(other) => Err(de::Error::custom(format!(
            "priceUsd must be a number or string, got {other}"
        ))),
    }
}

impl CoinCapProvider {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).context("coincap: invalid assets URL")?;
        Ok(Self {
            client: Client::new(),
            base,
        })
    }
}

#[async_trait]
impl PriceProvider for CoinCapProvider {
    fn name(&self) -> &'static str {
        "coincap"
    }

    async fn fetch_usd(&self, watchlist: &[String]) -> Result<HashMap<String, Option<f64>>> {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("limit", &ASSET_LIMIT.to_string());

        let listing: AssetListing = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .context("coincap: request failed")?
            .error_for_status()
            .context("coincap: non-success status")?
            .json()
            .await
            .context("coincap: malformed listing payload")?;

        let records = listing
            .data
            .into_iter()
            .map(|rec| (rec.symbol, rec.price_usd));
        Ok(align_prices(records, watchlist))
    }
}
