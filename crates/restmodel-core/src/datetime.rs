//! Datetime parsing for field coercion.
//!
//! Parsing runs in two tiers: a strict table first (RFC 3339 and the
//! ISO-ish formats the backend normally emits), then a permissive table of
//! human formats. Naive results are given a UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Formats accepted by the strict tier (with and without a time part).
const STRICT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const STRICT_DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

/// Formats accepted by the permissive fallback tier.
const PERMISSIVE_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M",
];

const PERMISSIVE_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%m/%d/%Y", "%B %d, %Y", "%b %d %Y"];

/// Parse a datetime string, strict formats first, permissive second.
///
/// Returns `None` when no tier recognizes the input.
pub fn parse_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    parse_strict(raw).or_else(|| parse_permissive(raw))
}

fn parse_strict(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    parse_tables(raw, STRICT_DATETIME_FORMATS, STRICT_DATE_FORMATS)
}

fn parse_permissive(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed);
    }
    parse_tables(raw, PERMISSIVE_DATETIME_FORMATS, PERMISSIVE_DATE_FORMATS)
}

fn parse_tables(
    raw: &str,
    datetime_formats: &[&str],
    date_formats: &[&str],
) -> Option<DateTime<FixedOffset>> {
    for format in datetime_formats {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(assume_utc(parsed));
        }
    }
    for format in date_formats {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return Some(assume_utc(parsed.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}

fn assume_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().fixed_offset()
}
