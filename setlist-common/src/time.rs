//! Calendar-day utilities

use chrono::{NaiveDate, Utc};

/// Current calendar date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole calendar days from `from` to `to`
///
/// Negative when `to` is earlier than `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
