//! Maps free-form question text to a watchlist ticker.

/// Coin-name spellings that imply a ticker. Checked in order, and a later
/// group overrides an earlier one when several names appear in one question.
const ALIASES: &[(&str, &[&str])] = &[
    ("ETH", &["ethereum", "eth"]),
    ("BNB", &["binance", "bnb"]),
    ("SOL", &["solana", "sol"]),
    ("MATIC", &["matic", "polygon"]),
];

/// Two passes over the lowercased text: first the watchlist tickers
/// themselves (first hit wins), then the alias table (last hit wins).
/// Alias targets only count while they are on the watchlist.
pub fn resolve_symbol(text: &str, watchlist: &[String]) -> Option<String> {
    let text = text.to_lowercase();

    for symbol in watchlist {
        if text.contains(&symbol.to_lowercase()) {
            return Some(symbol.clone());
        }
    }

    let mut found = None;
    for (target, needles) in ALIASES {
        let Some(member) = watchlist.iter().find(|s| s.as_str() == *target) else {
            continue;
        };
        if needles.iter().any(|needle| text.contains(needle)) {
            found = Some(member.clone());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist() -> Vec<String> {
        ["BTC", "ETH", "BNB", "SOL", "MATIC"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn resolves_a_coin_name_to_its_ticker() {
        assert_eq!(
            resolve_symbol("price of solana", &watchlist()),
            Some("SOL".to_string())
        );
        assert_eq!(
            resolve_symbol("ethereum", &watchlist()),
            Some("ETH".to_string())
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(
            resolve_symbol("PRECIO DE SOLANA", &watchlist()),
            Some("SOL".to_string())
        );
        assert_eq!(
            resolve_symbol("I like Polygon", &watchlist()),
            Some("MATIC".to_string())
        );
    }

    #[test]
    fn first_ticker_on_the_watchlist_wins() {
        assert_eq!(
            resolve_symbol("btc and eth", &watchlist()),
            Some("BTC".to_string())
        );
    }

    #[test]
    fn last_alias_group_wins_when_several_names_appear() {
        assert_eq!(
            resolve_symbol("binance or polygon", &watchlist()),
            Some("MATIC".to_string())
        );
    }

    #[test]
    fn ticker_substrings_outrank_alias_names() {
        // "sol" inside "solana" is a watchlist hit before any alias applies
        assert_eq!(
            resolve_symbol("solana polygon", &watchlist()),
            Some("SOL".to_string())
        );
    }

    #[test]
    fn unrelated_text_resolves_to_nothing() {
        assert_eq!(resolve_symbol("weather in Paris", &watchlist()), None);
        assert_eq!(resolve_symbol("", &watchlist()), None);
    }

    #[test]
    fn bitcoin_spelled_out_has_no_alias() {
        // "btc" is not a substring of "bitcoin" and no alias covers it.
        assert_eq!(resolve_symbol("bitcoin", &watchlist()), None);
    }

    #[test]
    fn alias_targets_off_the_watchlist_do_not_resolve() {
        let short: Vec<String> = vec!["BTC".to_string()];
        assert_eq!(resolve_symbol("ethereum", &short), None);
    }
}
