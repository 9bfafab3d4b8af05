//! Parsing for the temporal and coordinate cells of a host row.
//!
//! Every function here is total: malformed input yields `None`, never an
//! error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date layouts the host may render `activity_date` in.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %e, %Y", "%b %e, %Y"];

/// Datetime layouts whose date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses the hour out of an `HH:MM` start time. Returns `None` if blank,
/// unparseable, or outside 0-23.
#[must_use]
pub fn parse_hour(start_hour_min: &str) -> Option<u8> {
    let trimmed = start_hour_min.trim();
    if trimmed.is_empty() {
        return None;
    }
    let hour = trimmed.split(':').next()?.trim().parse::<u8>().ok()?;
    (hour < 24).then_some(hour)
}

/// Parses an `activity_date` cell into a calendar date.
///
/// Accepts ISO dates, US-style `M/D/YYYY`, long-form `January 15, 2024`,
/// and ISO datetimes with a `T` or space separator (the date part is
/// kept). Returns `None` for anything else.
#[must_use]
pub fn parse_activity_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.date())
}

/// Validates a longitude/latitude pair. Returns `None` if either is
/// missing, non-finite, or out of range.
#[must_use]
pub fn parse_lon_lat(longitude: Option<f64>, latitude: Option<f64>) -> Option<(f64, f64)> {
    let longitude = longitude?;
    let latitude = latitude?;
    if !longitude.is_finite() || !latitude.is_finite() {
        return None;
    }
    if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
        return None;
    }
    Some((longitude, latitude))
}
