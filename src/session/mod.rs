//! Interactive sessions over the price feed, live and one-shot.

mod input;

pub use input::{QuestionSource, StdinQuestionSource, VecQuestionSource};

use crate::config::OracleConfig;
use crate::market::{PriceFeed, PriceSnapshot};
use crate::resolve::resolve_symbol;
use crate::translate::{Translation, Translator};
use crate::ui::chart::render_chart;
use crate::ui::spinner::with_spinner;
use crate::ui::status::{price_line, print_empty_question_notice, print_translation};
use anyhow::{Context, Result};
use dialoguer::console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Holds the feed, the selected symbol, and the fetch and render counts.
/// Questions move the selection; timer ticks move the prices.
pub struct OracleSession {
    translator: Arc<dyn Translator>,
    feed: PriceFeed,
    selected: String,
    cycles: u64,
    renders: u64,
}

impl OracleSession {
    pub fn new(initial: &str, translator: Arc<dyn Translator>, feed: PriceFeed) -> Self {
        Self {
            translator,
            feed,
            selected: initial.to_string(),
            cycles: 0,
            renders: 0,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn snapshot(&self) -> PriceSnapshot {
        self.feed.snapshot()
    }

    /// One timer tick: fetch, store, count.
    pub async fn fetch_cycle(&mut self) -> PriceSnapshot {
        let snapshot = self.feed.refresh().await;
        self.cycles += 1;
        debug!(
            cycle = self.cycles,
            stale = snapshot.stale,
            "price fetch finished"
        );
        snapshot
    }

    /// Chart plus the highlight line for the selected symbol.
    pub fn render(&mut self, snapshot: &PriceSnapshot) {
        self.renders += 1;
        let chart = render_chart(
            snapshot,
            self.feed.watchlist(),
            &self.selected,
            self.feed.source(),
        );
        info!(target: "plain", "\n{chart}");
        info!(
            target: "plain",
            "{}\n",
            price_line(&self.selected, snapshot.price(&self.selected))
        );
    }

    async fn fetch_and_render(&mut self) {
        let snapshot = self.fetch_cycle().await;
        self.render(&snapshot);
    }

    /// Updates the selection from a typed line. Returns false for an
    /// empty line; a question that resolves to nothing keeps the
    /// current selection.
    pub async fn apply_question(&mut self, raw: &str) -> bool {
        let question = raw.trim();
        if question.is_empty() {
            print_empty_question_notice();
            return false;
        }

        // A bare ticker is a direct selection, no translation round-trip.
        if let Some(symbol) = self
            .feed
            .watchlist()
            .iter()
            .find(|s| s.eq_ignore_ascii_case(question))
        {
            self.selected = symbol.clone();
            return true;
        }

        let outcome = with_spinner("translating...", self.translator.translate(question)).await;
        let translation = match outcome {
            Ok(translation) => translation,
            Err(err) => {
                warn!("translation failed, using the original text: {err:#}");
                Translation::fallback(question)
            }
        };
        print_translation(&translation);

        if let Some(symbol) = resolve_symbol(&translation.text, self.feed.watchlist()) {
            self.selected = symbol;
        }
        true
    }

    /// Question path for the live session. Re-renders from the stored
    /// snapshot; the timer is the only thing that fetches.
    pub async fn handle_question(&mut self, raw: &str) {
        if self.apply_question(raw).await {
            let snapshot = self.snapshot();
            self.render(&snapshot);
        }
    }
}

/// Live session: the chart refreshes on a timer while questions typed at
/// the prompt move the highlight. Ends on `exit` or end of input.
pub async fn run_watch(
    config: &OracleConfig,
    translator: Arc<dyn Translator>,
    feed: PriceFeed,
    source: impl QuestionSource,
) -> Result<()> {
    let mut session = OracleSession::new(&config.selected, translator, feed);

    info!(
        target: "plain",
        "💬 {}",
        style("Type a question (any language), a symbol to highlight it, or 'exit' to quit.").dim()
    );

    watch_loop(&mut session, config.refresh, source).await?;

    info!(target: "plain", "{} Session ended", style("✔").green().bold());
    Ok(())
}

/// The select loop behind [`run_watch`]. The first tick fires at once, so
/// the session starts with a fetch; questions only re-render.
async fn watch_loop(
    session: &mut OracleSession,
    refresh: Duration,
    mut source: impl QuestionSource,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(8);
    let reader = task::spawn_blocking(move || -> Result<()> {
        while let Some(line) = source.next()? {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        Ok(())
    });

    let mut ticker = interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => session.fetch_and_render().await,
            line = rx.recv() => match line {
                Some(line) => session.handle_question(&line).await,
                None => break,
            },
        }
    }

    reader
        .await
        .context("question reader task panicked")?
        .context("question source failed")?;
    Ok(())
}

/// One-shot: a single question, one fetch, one chart.
pub async fn run_ask(
    config: &OracleConfig,
    question: Option<String>,
    translator: Arc<dyn Translator>,
    feed: PriceFeed,
) -> Result<()> {
    let question: String = match question {
        Some(question) => question,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Your question (any language)")
            .allow_empty(true)
            .interact_text()
            .context("reading the question prompt")?,
    };

    let mut session = OracleSession::new(&config.selected, translator, feed);
    if !session.apply_question(&question).await {
        return Ok(());
    }

    let snapshot = with_spinner("fetching prices...", session.fetch_cycle()).await;
    session.render(&snapshot);
    Ok(())
}
