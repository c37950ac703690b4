//! Runtime configuration assembled from CLI arguments and environment.

use crate::args::{AskArgs, WatchArgs, DEFAULT_REFRESH_SECS};
use crate::market::{
    CoinCapProvider, CoingeckoProvider, PriceFeed, PriceProvider, PriceSource, DEFAULT_ASSETS_URL,
    DEFAULT_SIMPLE_PRICE_URL,
};
use crate::translate::{GoogleTranslateClient, Translator};
use anyhow::{bail, Context, Result};
use derive_builder::Builder;
use dialoguer::console::style;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TARGET_LANG: &str = "en";

#[derive(Builder, Clone, Debug)]
pub struct TranslateConfig {
    /// The translation endpoint queried for every question
    #[builder(setter(into), default = "DEFAULT_TRANSLATE_URL.to_string()")]
    pub endpoint: String,
    /// The language questions are translated into before resolution
    #[builder(setter(into), default = "DEFAULT_TARGET_LANG.to_string()")]
    pub target_lang: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSLATE_URL.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
        }
    }
}

impl TranslateConfig {
    pub fn builder() -> TranslateConfigBuilder {
        TranslateConfigBuilder::default()
    }
}

#[derive(Builder, Clone, Debug, Default)]
pub struct MarketConfig {
    /// The listing prices are fetched from
    #[builder(default)]
    pub source: PriceSource,
    /// Overrides the source's default endpoint when set
    #[builder(setter(into), default)]
    pub endpoint: Option<String>,
}

impl MarketConfig {
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }
}

#[derive(Builder, Clone)]
#[builder(pattern = "owned")]
pub struct OracleConfig {
    /// Uppercased tickers, in display order
    pub watchlist: Vec<String>,
    /// Highlighted ticker, always a watchlist member
    #[builder(setter(into))]
    pub selected: String,
    /// Delay between chart refreshes
    #[builder(default = "Duration::from_secs(DEFAULT_REFRESH_SECS)")]
    pub refresh: Duration,
    #[builder(default)]
    pub translate: TranslateConfig,
    #[builder(default)]
    pub market: MarketConfig,
}

impl OracleConfig {
    pub fn builder() -> OracleConfigBuilder {
        OracleConfigBuilder::default()
    }

    pub fn from_watch_args(args: WatchArgs) -> Result<Self> {
        let watchlist = normalize_watchlist(&args.watchlist)?;
        let selected = resolve_initial_symbol(args.symbol.as_deref(), &watchlist)?;

        let mut translate = TranslateConfig::builder();
        if let Some(url) = args.translate_url {
            translate.endpoint(url);
        }

        let mut market = MarketConfig::builder();
        market.source(args.source);
        if let Some(url) = args.assets_url {
            market.endpoint(url);
        }

        let config = Self::builder()
            .watchlist(watchlist)
            .selected(selected)
            .refresh(Duration::from_secs(args.refresh_secs))
            .translate(translate.build().context("assembling translation config")?)
            .market(market.build().context("assembling market config")?)
            .build()
            .context("assembling oracle config")?;

        config.print_summary();
        Ok(config)
    }

    pub fn from_ask_args(args: AskArgs) -> Result<Self> {
        let watchlist = normalize_watchlist(&args.watchlist)?;
        let selected = resolve_initial_symbol(args.symbol.as_deref(), &watchlist)?;

        let mut translate = TranslateConfig::builder();
        if let Some(url) = args.translate_url {
            translate.endpoint(url);
        }

        let mut market = MarketConfig::builder();
        market.source(args.source);
        if let Some(url) = args.assets_url {
            market.endpoint(url);
        }

        let config = Self::builder()
            .watchlist(watchlist)
            .selected(selected)
            .translate(translate.build().context("assembling translation config")?)
            .market(market.build().context("assembling market config")?)
            .build()
            .context("assembling oracle config")?;

        config.print_summary();
        Ok(config)
    }

    /// Styled summary printed once at startup.
    fn print_summary(&self) {
        let check = || style("✔").green().bold();

        let kv = |k: &str, v: &str| {
            format!(
                "{} {} {}",
                check(),
                style(k).bold(),
                style(format!("· {}", v)).dim()
            )
        };

        info!(target: "plain", "{}", kv("Watchlist", &self.watchlist.join(", ")));
        info!(target: "plain", "{}", kv("Highlighted", &self.selected));
        info!(target: "plain", "{}", kv("Price source", &self.market.source.to_string()));
        info!(target: "plain",
            "{}",
            kv("Refresh interval", &format!("{}s", self.refresh.as_secs()))
        );
        info!(target: "plain", "{}", kv("Translation endpoint", &self.translate.endpoint));

        info!(target: "plain",
            "{} {} {}\n\n",
            style("✔").blue(),
            style("Configuration complete").bold(),
            style("✔").blue()
        );
    }

    pub fn build_translator(&self) -> Result<Arc<dyn Translator>> {
        let client =
            GoogleTranslateClient::new(&self.translate.endpoint, &self.translate.target_lang)?;
        Ok(Arc::new(client))
    }

    pub fn build_feed(&self) -> Result<PriceFeed> {
        let provider: Arc<dyn PriceProvider> = match self.market.source {
            PriceSource::CoinCap => {
                let base = self
                    .market
                    .endpoint
                    .as_deref()
                    .unwrap_or(DEFAULT_ASSETS_URL);
                Arc::new(CoinCapProvider::new(base)?)
            }
            PriceSource::Coingecko => {
                let base = self
                    .market
                    .endpoint
                    .as_deref()
                    .unwrap_or(DEFAULT_SIMPLE_PRICE_URL);
                Arc::new(CoingeckoProvider::new(base)?)
            }
        };
        Ok(PriceFeed::new(provider, self.watchlist.clone()))
    }
}

fn normalize_watchlist(raw: &[String]) -> Result<Vec<String>> {
    let mut watchlist = Vec::new();
    for entry in raw {
        let symbol = entry.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            continue;
        }
        if !watchlist.contains(&symbol) {
            watchlist.push(symbol);
        }
    }
    if watchlist.is_empty() {
        bail!("watchlist must contain at least one symbol");
    }
    Ok(watchlist)
}

fn resolve_initial_symbol(requested: Option<&str>, watchlist: &[String]) -> Result<String> {
    match requested {
        Some(requested) => {
            let requested = requested.trim().to_ascii_uppercase();
            if !watchlist.iter().any(|s| *s == requested) {
                bail!("symbol '{requested}' is not on the watchlist {watchlist:?}");
            }
            Ok(requested)
        }
        None => Ok(watchlist[0].clone()),
    }
}
