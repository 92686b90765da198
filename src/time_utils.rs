// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// All stored exercise dates go through this formatter so that Firestore
/// range filters on the string field compare chronologically.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp as a human-readable day string, e.g.
/// `Mon Jan 02 2023`.
pub fn format_day_string(date: DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Parse a caller-supplied date as RFC3339 or `YYYY-MM-DD` (midnight UTC).
pub fn parse_date_input(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
