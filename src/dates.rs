//! Calendar-day and numeric helpers shared by every store.
//!
//! Nothing in here reads the clock. Callers pass "today" in explicitly.

use chrono::{DateTime, Datelike, NaiveDate};

/// Formats any date-like value as `YYYY-MM-DD`, keeping only its own
/// year, month and day.
pub fn format_date<D: Datelike>(d: &D) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())
}

/// Truncates any date-like value to its calendar day.
pub fn calendar_day<D: Datelike>(d: &D) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), d.day()).unwrap_or_default()
}

/// Parses `YYYY-MM-DD`, or the calendar date of an RFC 3339 / ISO date-time.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(calendar_day(&dt));
    }
    // Naive ISO date-time: the leading ten characters carry the date.
    input
        .get(..10)
        .filter(|_| input.as_bytes().get(10) == Some(&b'T'))
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Whole calendar days from `from` to `to`, never negative.
pub fn days_between<A: Datelike, B: Datelike>(from: &A, to: &B) -> i64 {
    let diff = calendar_day(to) - calendar_day(from);
    diff.num_days().max(0)
}

pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        return lo;
    }
    x.max(lo).min(hi)
}

pub fn clamp_percent(x: f64) -> f64 {
    clamp(x, 0.0, 100.0)
}

fn parse_finite(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses user numeric input, accepting only finite values above zero.
pub fn parse_positive(input: &str) -> Option<f64> {
    parse_finite(input).filter(|v| *v > 0.0)
}

/// Like [`parse_positive`] but also accepts zero, for values where zero
/// means "unset".
pub fn parse_non_negative(input: &str) -> Option<f64> {
    parse_finite(input).filter(|v| *v >= 0.0)
}
