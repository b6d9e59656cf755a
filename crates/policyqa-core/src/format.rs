//! Presentation helpers for amounts and procedure steps.
//!
//! Amounts in a section are untyped numbers. By convention values of
//! [`CURRENCY_THRESHOLD`] and above are money, values up to
//! [`DAY_COUNT_CEILING`] are day or item counts, and anything in between is
//! left unreported.

/// Smallest amount treated as a currency value.
pub const CURRENCY_THRESHOLD: u64 = 1000;

/// Largest amount treated as a day/count value.
pub const DAY_COUNT_CEILING: u64 = 30;

/// Separator between procedure steps.
pub const STEP_SEPARATOR: &str = " → ";

pub fn is_currency(amount: u64) -> bool {
    amount >= CURRENCY_THRESHOLD
}

pub fn is_day_count(amount: u64) -> bool {
    amount <= DAY_COUNT_CEILING
}

/// Group digits in threes: 50000 → "50,000".
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_currency(amount: u64, unit: &str) -> String {
    format!("{} {}", format_thousands(amount), unit)
}

/// Currency amounts of a section joined with ", ". Non-currency values are skipped.
pub fn format_currency_list(amounts: &[u64], unit: &str) -> String {
    amounts
        .iter()
        .copied()
        .filter(|&a| is_currency(a))
        .map(|a| format_currency(a, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn join_steps(steps: &[String]) -> String {
    steps.join(STEP_SEPARATOR)
}

/// Truncate to at most `max` characters without splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
