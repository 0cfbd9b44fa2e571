//! Display formatting for dashboard cards.
//!
//! Everything shown to the user goes through fixed-point decimal rounding
//! with half-away-from-zero semantics, so `6.25` at one place renders as
//! `6.3` regardless of how the host would print the binary float.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `dp` places (half away from zero) and render exactly `dp` decimals.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// `numerator / denominator * 100` with `dp` decimals and a `%` suffix.
/// Returns `None` when the denominator is zero.
pub fn percent(numerator: Decimal, denominator: Decimal, dp: u32) -> Option<String> {
    if denominator.is_zero() {
        return None;
    }
    let pct = numerator * Decimal::ONE_HUNDRED / denominator;
    Some(format!("{}%", fixed(pct, dp)))
}

/// Dollar amount with two decimals, e.g. `$364.00`.
pub fn currency(amount: Decimal) -> String {
    format!("${}", fixed(amount, 2))
}

/// Integer with `,` thousands separators.
pub fn with_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Float with `dp` decimals and `,` thousands separators in the integer part.
pub fn with_thousands_f64(value: f64, dp: usize) -> String {
    let rendered = format!("{:.*}", dp, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };
    let mut out = String::new();
    if value.is_sign_negative() && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
