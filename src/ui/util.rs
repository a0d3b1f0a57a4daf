use rust_decimal::Decimal;

use crate::models::round_cents;

/// Format money with thousand separators and 2 decimal places.
/// e.g. `1234567.891` → `"$1,234,567.89"`, `-3.5` → `"-$3.50"`
pub(crate) fn format_money(val: Decimal) -> String {
    let formatted = format!("{:.2}", round_cents(val.abs()));
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}${with_commas}.{dec_part}")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Split `"<description words> <amount>"` at the last space.
pub(crate) fn split_trailing_amount(input: &str) -> Option<(&str, &str)> {
    let (description, amount) = input.trim().rsplit_once(char::is_whitespace)?;
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    Some((description, amount))
}
