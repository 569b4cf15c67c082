//! Helpers for the pt-BR formatted numbers and markup the sources publish.

use scraper::{ElementRef, Selector};

use crate::error::{Result, SourceError};

/// Parse a pt-BR formatted number.
///
/// Accepts `R$` prefixes, `%` suffixes, `.` thousands separators, `,`
/// decimals and `K`/`M`/`B` magnitude suffixes. Anything unparseable,
/// including `-` placeholders, yields `0.0`.
pub fn parse_br_number(text: &str) -> f64 {
    let cleaned: String = text
        .replace("R$", "")
        .replace('%', "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let (digits, multiplier) = match cleaned.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        Some('B') => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let normalized = digits.replace('.', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value * multiplier,
        _ => 0.0,
    }
}

/// Compile a CSS selector, reporting failures against the source.
pub fn selector(source_name: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| {
        SourceError::Malformed {
            source_name,
            reason: format!("invalid selector {css:?}: {e}"),
        }
        .into()
    })
}

/// Element text with whitespace collapsed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_br_formats() {
        assert_eq!(parse_br_number("1.234,56"), 1234.56);
        assert_eq!(parse_br_number("12,5%"), 12.5);
        assert_eq!(parse_br_number("R$ 0,12"), 0.12);
        assert_eq!(parse_br_number("-3,40"), -3.4);
        assert_eq!(parse_br_number("R$ 2,5 M"), 2_500_000.0);
        assert_eq!(parse_br_number("750K"), 750_000.0);
        assert_eq!(parse_br_number("1,2B"), 1_200_000_000.0);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(parse_br_number(""), 0.0);
        assert_eq!(parse_br_number("-"), 0.0);
        assert_eq!(parse_br_number("n/d"), 0.0);
    }
}
