//! Command-line surface, parsed with clap.

use crate::market::PriceSource;
use clap::{Args, Parser, Subcommand};

pub const DEFAULT_WATCHLIST: &str = "BTC,ETH,BNB,SOL,MATIC"; // tickers shown on the chart
pub const DEFAULT_REFRESH_SECS: u64 = 10; // seconds between chart redraws
pub const DEFAULT_PRICE_SOURCE: &str = "coincap";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Ask about a coin in any language; watch its USD price live"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Live session: an auto-refreshing chart plus questions typed at the prompt
    Watch(WatchArgs),
    /// One question: translate, resolve, fetch once, render once
    Ask(AskArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Comma-separated tickers to chart
    #[arg(
        long,
        env = "ORACLE_WATCHLIST",
        value_delimiter = ',',
        default_value = DEFAULT_WATCHLIST
    )]
    pub watchlist: Vec<String>,

    /// Ticker highlighted at startup; defaults to the first watchlist entry
    #[arg(long, env = "ORACLE_SYMBOL")]
    pub symbol: Option<String>,

    /// Seconds between chart refreshes
    #[arg(
        long,
        env = "ORACLE_REFRESH_SECS",
        value_parser = parse_refresh_secs,
        default_value_t = DEFAULT_REFRESH_SECS
    )]
    pub refresh_secs: u64,

    /// Price listing to fetch from
    #[arg(
        long,
        env = "ORACLE_PRICE_SOURCE",
        value_parser = parse_price_source,
        default_value = DEFAULT_PRICE_SOURCE
    )]
    pub source: PriceSource,

    /// Overrides the price listing endpoint
    #[arg(long, env = "ORACLE_ASSETS_URL")]
    pub assets_url: Option<String>,

    /// Overrides the translation endpoint
    #[arg(long, env = "ORACLE_TRANSLATE_URL")]
    pub translate_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct AskArgs {
    /// The question; prompts interactively when omitted
    pub question: Option<String>,

    /// Comma-separated tickers to chart
    #[arg(
        long,
        env = "ORACLE_WATCHLIST",
        value_delimiter = ',',
        default_value = DEFAULT_WATCHLIST
    )]
    pub watchlist: Vec<String>,

    /// Ticker highlighted when the question resolves to nothing
    #[arg(long, env = "ORACLE_SYMBOL")]
    pub symbol: Option<String>,

    /// Price listing to fetch from
    #[arg(
        long,
        env = "ORACLE_PRICE_SOURCE",
        value_parser = parse_price_source,
        default_value = DEFAULT_PRICE_SOURCE
    )]
    pub source: PriceSource,

    /// Overrides the price listing endpoint
    #[arg(long, env = "ORACLE_ASSETS_URL")]
    pub assets_url: Option<String>,

    /// Overrides the translation endpoint
    #[arg(long, env = "ORACLE_TRANSLATE_URL")]
    pub translate_url: Option<String>,
}

fn parse_refresh_secs(raw: &str) -> Result<u64, String> {
    let secs: u64 = raw.parse().map_err(|_| {
        format!("invalid ORACLE_REFRESH_SECS '{raw}'; expected a whole number of seconds")
    })?;
    if secs == 0 {
        return Err("refresh interval must be at least 1 second".to_string());
    }
    Ok(secs)
}

fn parse_price_source(raw: &str) -> Result<PriceSource, String> {
    match raw.to_ascii_lowercase().as_str() {
        "coincap" | "cap" => Ok(PriceSource::CoinCap),
        "coingecko" | "gecko" => Ok(PriceSource::Coingecko),
        _ => Err(format!(
            "invalid ORACLE_PRICE_SOURCE '{raw}'; expected one of: coincap, coingecko \
             (aliases: cap, gecko)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn refresh_seconds_must_be_positive() {
        assert_eq!(parse_refresh_secs("10"), Ok(10));
        assert!(parse_refresh_secs("0").is_err());
        assert!(parse_refresh_secs("fast").is_err());
    }

    #[test]
    fn price_source_accepts_known_names_and_aliases() {
        assert_eq!(parse_price_source("coincap"), Ok(PriceSource::CoinCap));
        assert_eq!(parse_price_source("cap"), Ok(PriceSource::CoinCap));
        assert_eq!(parse_price_source("GECKO"), Ok(PriceSource::Coingecko));
        assert!(parse_price_source("kraken").is_err());
    }
}
