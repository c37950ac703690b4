//! Styled one-line messages printed between chart redraws.

use crate::translate::Translation;
use dialoguer::console::style;
use tracing::info;

/// USD amount with thousands separators, at least two and at most six
/// fraction digits.
pub(crate) fn format_usd(price: f64) -> String {
    let fixed = format!("{price:.6}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    // keep the sign out of the grouping
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };

    let mut frac = frac_part;
    while frac.len() > 2 && frac.ends_with('0') {
        frac = &frac[..frac.len() - 1];
    }

    format!("{sign}{}.{frac}", group_thousands(digits))
}

fn group_thousands(digits: &str) -> String {
    let offset = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn print_translation(translation: &Translation) {
    let check = style("✔").green().bold();
    let kv = |key: &str, value: String| {
        info!(target: "plain", "{check} {} · {value}", style(key).bold());
    };

    kv("Detected language", translation.detected.clone());
    kv(
        "Translation",
        format!("\"{}\"", style(&translation.text).italic()),
    );
}

/// Highlight line under the chart, `SYM → $1,234.50` or the
/// not-available notice.
pub(crate) fn price_line(symbol: &str, price: Option<f64>) -> String {
    match price {
        Some(price) => format!(
            "{} → {}",
            style(symbol).bold(),
            style(format!("${}", format_usd(price))).cyan().bold()
        ),
        None => format!(
            "{} → {}",
            style(symbol).bold(),
            style("Price not available").yellow()
        ),
    }
}

pub(crate) fn print_empty_question_notice() {
    info!(
        target: "plain",
        "💬 {}",
        style("Please type a question (any language).").dim()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting_groups_thousands_and_keeps_two_fraction_digits() {
        assert_eq!(format_usd(109432.1), "109,432.10");
        assert_eq!(format_usd(1234.5), "1,234.50");
        assert_eq!(format_usd(1000000.0), "1,000,000.00");
        assert_eq!(format_usd(151.0), "151.00");
    }

    #[test]
    fn usd_formatting_keeps_sub_dollar_precision() {
        assert_eq!(format_usd(0.523481), "0.523481");
        assert_eq!(format_usd(0.1234567), "0.123457");
    }

    #[test]
    fn negative_amounts_keep_the_sign_ahead_of_the_grouping() {
        assert_eq!(format_usd(-123456.0), "-123,456.00");
        assert_eq!(format_usd(-0.5), "-0.50");
    }

    #[test]
    fn price_line_reports_missing_prices() {
        let line = price_line("MATIC", None);
        assert!(line.contains("MATIC"));
        assert!(line.contains("Price not available"));
    }

    #[test]
    fn price_line_shows_the_formatted_quote() {
        let line = price_line("BTC", Some(109432.1));
        assert!(line.contains("$109,432.10"));
    }
}
