//! Canonical `YYYY-MM-DD` dates and the clock that supplies "today".

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

static CANONICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static LEADING_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());

/// Source of the current calendar date. Injected so tests can pin "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;

    fn today_canonical(&self) -> String {
        self.today().format(CANONICAL_FORMAT).to_string()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a given day (midnight UTC).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

/// True for a well-formed, real calendar date in `YYYY-MM-DD` form.
pub fn is_canonical(s: &str) -> bool {
    CANONICAL.is_match(s) && NaiveDate::parse_from_str(s, CANONICAL_FORMAT).is_ok()
}

pub fn parse_canonical(s: &str) -> Option<NaiveDate> {
    if !CANONICAL.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, CANONICAL_FORMAT).ok()
}

/// Convert a timestamp as found in feeds and article metadata into the
/// canonical form. Zoned timestamps are converted to UTC first.
///
/// Accepts RFC 3339, RFC 2822, naive `YYYY-MM-DDTHH:MM:SS`, and anything that
/// starts with `YYYY-MM-DD`.
pub fn to_canonical(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| {
            LEADING_DATE
                .captures(raw)
                .and_then(|c| NaiveDate::parse_from_str(&c[1], CANONICAL_FORMAT).ok())
        })?;

    Some(date.format(CANONICAL_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2822_is_converted_to_utc_day() {
        assert_eq!(
            to_canonical("Fri, 05 Jan 2024 10:00:00 +0000").as_deref(),
            Some("2024-01-05")
        );
        // 02:00 in India is still the previous day in UTC.
        assert_eq!(
            to_canonical("Sat, 06 Jan 2024 02:00:00 +0530").as_deref(),
            Some("2024-01-05")
        );
    }

    #[test]
    fn test_rfc3339_and_naive_forms() {
        assert_eq!(
            to_canonical("2024-01-10T08:30:00Z").as_deref(),
            Some("2024-01-10")
        );
        assert_eq!(
            to_canonical("2024-01-10T08:30:00").as_deref(),
            Some("2024-01-10")
        );
        assert_eq!(
            to_canonical("2024-01-10 08:30").as_deref(),
            Some("2024-01-10")
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(to_canonical(""), None);
        assert_eq!(to_canonical("   "), None);
        assert_eq!(to_canonical("yesterday"), None);
        assert_eq!(to_canonical("2024-13-45"), None);
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("2024-02-29"));
        assert!(!is_canonical("2023-02-29"));
        assert!(!is_canonical("2024-1-5"));
        assert!(!is_canonical("05/01/2024"));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(clock.today_canonical(), "2024-01-07");
        assert_eq!(clock.now().to_rfc3339(), "2024-01-07T00:00:00+00:00");
    }
}
