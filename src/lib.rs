//! Polyglot price oracle: ask about a coin in any language, watch its USD
//! price on a live terminal chart.
//!
//! Questions are translated to English through the public Google Translate
//! endpoint, resolved to a watchlist ticker, and the chart highlight moves
//! there. Prices come from a public listing (CoinCap by default) on a
//! fixed-interval refresh; every fetch failure degrades to the last good
//! snapshot instead of an error.

mod app;
mod args;
mod config;
mod market;
mod resolve;
mod session;
mod translate;
mod ui;

pub use app::Application;
pub use config::{MarketConfig, OracleConfig, TranslateConfig};
pub use market::{
    CoinCapProvider, CoingeckoProvider, PriceFeed, PriceProvider, PriceSnapshot, PriceSource,
};
pub use resolve::resolve_symbol;
pub use session::{
    run_ask, run_watch, OracleSession, QuestionSource, StdinQuestionSource, VecQuestionSource,
};
pub use translate::{GoogleTranslateClient, Translation, Translator};
