//! Presentation formatters: pure transforms from stored values to the
//! strings and numbers the dashboard expects.
//! Used by: handlers, console.

use chrono::DateTime;

/// Locale-independent thousands grouping: 15234 -> "15,234".
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Raw percentage: the stored value with a '%' suffix, no re-rounding.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

/// Display percentage, fixed at two decimals.
pub fn format_percent_display(value: f64) -> String {
    format!("{value:.2}%")
}

/// Tiered currency for KPI cards: cents -> "$2.5k" at or above $1000,
/// "$500" (whole dollars, grouped) below.
pub fn format_currency_tiered(cents: i64) -> String {
    let dollars = cents as f64 / 100.0;
    if dollars >= 1000.0 {
        format!("${:.1}k", dollars / 1000.0)
    } else {
        format!("${}", group_thousands(dollars.round() as i64))
    }
}

/// Display currency: cents -> "$123.45", always two decimals.
pub fn format_currency_display(cents: i64) -> String {
    format!("${:.2}", cents as f64 / 100.0)
}

/// Revenue data-point value: whole dollars, truncated toward zero.
/// 12345 cents -> 123.0. Truncation is the contract here, not rounding.
pub fn cents_to_whole_dollars(cents: i64) -> f64 {
    (cents / 100) as f64
}

/// Short chart label for a ms-epoch instant: "Jan 5", UTC, no leading zero.
/// Out-of-range instants render as an empty string.
pub fn day_label(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// ISO date for a ms-epoch instant: "2024-01-05", UTC.
pub fn date_iso(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
