//! Currency amount normalization.
//!
//! The portals print amounts the Argentine way (`$ 10.000,00`, or `$ 10.000`
//! without cents) but nothing guarantees it, so the decimal separator is
//! inferred. The last separator in the text is the decimal point unless
//! - its character also appears earlier (`1.234.567`), or
//! - exactly three digits follow it (`10.000`, `1,234.567`)
//!
//! in which case every separator is a thousands separator.
//!
//! The normalized form has at most one `.` and never three digits after it,
//! which makes [`normalize_amount`] idempotent.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Digits after a separator that mark it as a thousands separator.
const THOUSANDS_GROUP: usize = 3;

/// Normalizes amount text to a plain decimal string.
///
/// Strips currency symbols, spaces and anything else that is not a digit,
/// separator or minus sign, then rewrites separators as described in the
/// module docs. The result may still be unparseable (for example `-`).
pub fn normalize_amount(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let decimal_at = kept.rfind(['.', ',']).filter(|&at| {
        let separator = &kept[at..=at];
        kept.matches(separator).count() == 1 && kept.len() - at - 1 != THOUSANDS_GROUP
    });

    kept.char_indices()
        .filter_map(|(i, c)| match c {
            '.' | ',' => (Some(i) == decimal_at).then_some('.'),
            other => Some(other),
        })
        .collect()
}

/// Parses amount text into a decimal, or `None` if it is not a number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = normalize_amount(raw);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}
