//! Horizontal bar chart of the watchlist, one row per symbol.

use crate::market::PriceSnapshot;
use crate::ui::status::format_usd;
use dialoguer::console::style;

const BAR_WIDTH: usize = 40;

/// Eighth-block glyphs indexed by remainder, for sub-cell bar ends.
const PARTIAL_BLOCKS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Renders the snapshot as chart lines. Bars scale linearly against the
/// highest price in the snapshot; the selected symbol's row carries a
/// marker and the highlight color.
pub(crate) fn render_chart(
    snapshot: &PriceSnapshot,
    watchlist: &[String],
    selected: &str,
    source: &str,
) -> String {
    let max = watchlist
        .iter()
        .filter_map(|s| snapshot.price(s))
        .fold(0.0_f64, f64::max);
    let label_width = watchlist
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
        .max(5);

    let staleness = if snapshot.stale { " (stale)" } else { "" };
    let header = style(format!(
        "Price (USD) · {source} · {}{staleness}",
        snapshot.as_of.format("%H:%M:%S UTC")
    ))
    .bold()
    .to_string();
    let separator = style("═".repeat(label_width + BAR_WIDTH + 20))
        .dim()
        .to_string();

    let mut lines = vec![header, separator];
    for symbol in watchlist {
        let is_selected = symbol == selected;
        let marker = if is_selected {
            style("▸").cyan().bold().to_string()
        } else {
            " ".to_string()
        };

        let line = match snapshot.price(symbol) {
            Some(price) => {
                // Pad before styling so the color codes sit outside the
                // column width.
                let mut bar = bar_glyphs(price, max);
                let glyphs = bar.chars().count();
                if glyphs < BAR_WIDTH {
                    bar.push_str(&" ".repeat(BAR_WIDTH - glyphs));
                }
                let bar = if is_selected {
                    style(bar).cyan().bold().to_string()
                } else {
                    style(bar).blue().to_string()
                };
                format!(
                    "{marker} {symbol:<label_width$} {bar} ${}",
                    format_usd(price)
                )
            }
            None => format!(
                "{marker} {symbol:<label_width$} {} {}",
                " ".repeat(BAR_WIDTH),
                style("Price not available").yellow().dim()
            ),
        };
        lines.push(line);
    }

    lines.join("\n")
}

fn bar_glyphs(price: f64, max: f64) -> String {
    if max <= 0.0 || price <= 0.0 {
        return String::new();
    }
    let frac = (price / max).clamp(0.0, 1.0);
    let eighths = (frac * (BAR_WIDTH * 8) as f64).round() as usize;
    if eighths == 0 {
        // a sliver keeps tiny prices visible next to large ones
        return PARTIAL_BLOCKS[1].to_string();
    }
    let mut bar = "█".repeat(eighths / 8);
    if eighths % 8 > 0 {
        bar.push(PARTIAL_BLOCKS[eighths % 8]);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::PriceFeed;
    use crate::market::PriceProvider;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FixedProvider(HashMap<String, Option<f64>>);

    #[async_trait]
    impl PriceProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_usd(&self, _watchlist: &[String]) -> Result<HashMap<String, Option<f64>>> {
            Ok(self.0.clone())
        }
    }

    fn watchlist() -> Vec<String> {
        ["BTC", "ETH", "SOL"].iter().map(|s| s.to_string()).collect()
    }

    async fn snapshot_with(prices: &[(&str, Option<f64>)]) -> PriceSnapshot {
        let map: HashMap<String, Option<f64>> = prices
            .iter()
            .map(|(s, p)| (s.to_string(), *p))
            .collect();
        let mut feed = PriceFeed::new(Arc::new(FixedProvider(map)), watchlist());
        feed.refresh().await
    }

    #[tokio::test]
    async fn chart_has_one_row_per_watchlist_symbol() {
        let snapshot = snapshot_with(&[
            ("BTC", Some(100000.0)),
            ("ETH", Some(4000.0)),
            ("SOL", Some(150.0)),
        ])
        .await;
        let chart = render_chart(&snapshot, &watchlist(), "BTC", "coincap");
        assert_eq!(chart.lines().count(), watchlist().len() + 2);
    }

    #[tokio::test]
    async fn only_the_selected_row_carries_the_marker() {
        let snapshot = snapshot_with(&[
            ("BTC", Some(100000.0)),
            ("ETH", Some(4000.0)),
            ("SOL", Some(150.0)),
        ])
        .await;
        let chart = render_chart(&snapshot, &watchlist(), "SOL", "coincap");

        for line in chart.lines().skip(2) {
            if line.contains("SOL") {
                assert!(line.contains('▸'));
            } else {
                assert!(!line.contains('▸'));
            }
        }
    }

    #[tokio::test]
    async fn missing_prices_render_as_not_available() {
        let snapshot = snapshot_with(&[("BTC", Some(100000.0)), ("ETH", None)]).await;
        let chart = render_chart(&snapshot, &watchlist(), "BTC", "coincap");
        assert!(chart.contains("Price not available"));
    }

    #[tokio::test]
    async fn all_missing_prices_still_render() {
        let snapshot = snapshot_with(&[]).await;
        let chart = render_chart(&snapshot, &watchlist(), "BTC", "coincap");
        assert_eq!(chart.lines().count(), watchlist().len() + 2);
        assert_eq!(chart.matches("Price not available").count(), 3);
    }

    #[test]
    fn highest_price_fills_the_full_bar() {
        let bar = bar_glyphs(100.0, 100.0);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), BAR_WIDTH);
    }

    #[test]
    fn half_price_fills_half_the_bar() {
        let bar = bar_glyphs(50.0, 100.0);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn tiny_prices_keep_a_sliver() {
        let bar = bar_glyphs(0.0001, 100000.0);
        assert_eq!(bar, "▏");
    }

    #[test]
    fn no_prices_means_no_bar() {
        assert_eq!(bar_glyphs(0.0, 0.0), "");
        assert_eq!(bar_glyphs(10.0, 0.0), "");
    }
}
