//! Date parsing and display formatting

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Abbreviated month names per locale, January first.
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_DE: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez.",
];
const MONTHS_FR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Parse an ISO-8601-ish datetime string.
///
/// RFC 3339 is tried first; the fallbacks accept the naive forms that
/// show up in hand-written front-matter, interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let naive_formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc().fixed_offset());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(anyhow!("unrecognized datetime format: {:?}", s))
}

/// Format a parsed datetime for display: numeric year, abbreviated
/// month, numeric day, per the locale's conventions.
///
/// Only the primary subtag of the locale tag matters (`en-GB` formats
/// like `en`); unknown locales fall back to `en`. The date is rendered
/// in the datetime's own offset so output does not depend on the host
/// timezone.
pub fn display_date(dt: &DateTime<FixedOffset>, locale: &str) -> String {
    let lang = locale
        .split(['-', '_'])
        .next()
        .unwrap_or("en")
        .to_ascii_lowercase();

    let month = dt.month0() as usize;
    let (day, year) = (dt.day(), dt.year());

    match lang.as_str() {
        "de" => format!("{}. {} {}", day, MONTHS_DE[month], year),
        "fr" => format!("{} {} {}", day, MONTHS_FR[month], year),
        "es" => format!("{} {} {}", day, MONTHS_ES[month], year),
        _ => format!("{} {}, {}", MONTHS_EN[month], day, year),
    }
}

/// Parse and format in one step.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15T00:00:00Z", "en") // -> "Jan 15, 2024"
/// ```
pub fn format_date(datetime: &str, locale: &str) -> Result<String> {
    Ok(display_date(&parse_datetime(datetime)?, locale))
}
