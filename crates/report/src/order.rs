use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

fn numeric_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?")
            .expect("static numeric prefix pattern")
    })
}

/// Numeric value of the number `key` starts with, ignoring trailing text
/// (`"42 (longa)"` reads as 42).
///
/// Only keys starting with an ASCII digit count as numeric. Any key that
/// sorts between two such keys also starts with a digit, which keeps
/// [`compare_sizes`] a total order.
#[must_use]
pub fn leading_number(key: &str) -> Option<f64> {
    numeric_prefix()
        .find(key)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| !n.is_nan())
}

/// Order for size keys: numeric ascending when both keys start with a
/// number, case-insensitive text order otherwise (`"a"` before `"B"`).
/// Keys equal under those rules fall back to byte order so the result is
/// total; accents are not collated.
#[must_use]
pub fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        _ => compare_text(a, b),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
