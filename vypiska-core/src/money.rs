//! Localized money strings: `1 189,40`, `+21107,75`, `-750,00`.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ExtractError, Result};

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+(?:\.[0-9]+)?$").expect("number regex"))
}

/// Parse a money string with space-separated thousands and a decimal comma.
///
/// With `treat_unsigned_as_negative`, any value that does not carry an
/// explicit leading `+` is a debit and comes back negative.
///
/// Example: `parse_money("1 189,40", true) == Ok(-1189.40)`
pub fn parse_money(raw: &str, treat_unsigned_as_negative: bool) -> Result<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            '\u{2212}' => '-',
            other => other,
        })
        .collect();

    if !number_re().is_match(&cleaned) {
        return Err(ExtractError::malformed_amount(raw));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| ExtractError::malformed_amount(raw))?;

    if treat_unsigned_as_negative && !cleaned.starts_with('+') {
        return Ok(-value.abs());
    }
    Ok(value)
}

/// Render a value the way statements print it.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped},{:02}", cents % 100)
}
