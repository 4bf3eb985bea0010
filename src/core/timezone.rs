use chrono::{NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use crate::models::UserProfile;

/// Local hour at which the modeled workday starts
pub const WORKDAY_START_HOUR: f64 = 9.0;

/// Local hour at which the modeled workday ends
pub const WORKDAY_END_HOUR: f64 = 17.0;

/// Longest possible overlap of two workdays
pub const MAX_OVERLAP_HOURS: f64 = WORKDAY_END_HOUR - WORKDAY_START_HOUR;

/// Largest offset accepted from `UTC±H` notation
const MAX_FIXED_OFFSET_HOURS: f64 = 14.0;

const TIMEZONE_OFFSETS: &[(&str, f64)] = &[
    ("UTC", 0.0),
    ("EST", -5.0),
    ("CST", -6.0),
    ("MST", -7.0),
    ("PST", -8.0),
    ("GMT", 0.0),
    ("CET", 1.0),
    ("EET", 2.0),
    ("IST", 5.5),
    ("JST", 9.0),
    ("AEST", 10.0),
    ("NZST", 12.0),
];

const COUNTRY_TIMEZONES: &[(&str, &str)] = &[
    ("US-East", "EST"),
    ("US-Central", "CST"),
    ("US-Mountain", "MST"),
    ("US-West", "PST"),
    ("UK", "GMT"),
    ("Germany", "CET"),
    ("France", "CET"),
    ("India", "IST"),
    ("Japan", "JST"),
    ("Australia", "AEST"),
    ("New Zealand", "NZST"),
];

/// Resolve a timezone code to a signed hour offset
///
/// Accepts, in order: a table code (`EST`, `IST`, ...), fixed-offset notation
/// (`UTC+3`, `GMT-4:30`), or an IANA zone name (`Asia/Tokyo`). Anything that
/// cannot be resolved is treated as UTC.
pub fn timezone_offset_hours(code: &str) -> f64 {
    let code = code.trim();

    if let Some(offset) = table_offset(code) {
        return offset;
    }
    if let Some(offset) = fixed_offset(code) {
        return offset;
    }
    if let Some(offset) = iana_offset(code) {
        return offset;
    }

    tracing::trace!("Unresolved timezone {:?}, assuming UTC", code);
    0.0
}

#[inline]
fn table_offset(code: &str) -> Option<f64> {
    TIMEZONE_OFFSETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(code))
        .map(|(_, offset)| *offset)
}

/// Parse `UTC+5`, `UTC-3:30`, `GMT+10`
fn fixed_offset(code: &str) -> Option<f64> {
    let upper = code.to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))?;

    let (sign, digits) = match rest.chars().next()? {
        '+' => (1.0, &rest[1..]),
        '-' => (-1.0, &rest[1..]),
        _ => return None,
    };

    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<u8>().ok()?, m.parse::<u8>().ok()?),
        None => (digits.parse::<u8>().ok()?, 0),
    };
    if minutes >= 60 {
        return None;
    }

    let offset = f64::from(hours) + f64::from(minutes) / 60.0;
    if offset > MAX_FIXED_OFFSET_HOURS {
        return None;
    }

    Some(sign * offset)
}

/// Offset of an IANA zone at a fixed winter reference instant, so that the
/// same zone always resolves to the same value
fn iana_offset(code: &str) -> Option<f64> {
    let tz: Tz = code.parse().ok()?;
    let reference = NaiveDate::from_ymd_opt(2024, 1, 15)?.and_hms_opt(12, 0, 0)?;
    let seconds = tz.offset_from_utc_datetime(&reference).fix().local_minus_utc();
    Some(f64::from(seconds) / 3600.0)
}

/// Resolved offset of a profile, `None` when it has no timezone
pub fn profile_offset(profile: &UserProfile) -> Option<f64> {
    profile.timezone().map(timezone_offset_hours)
}

/// Primary timezone code for a country, `UTC` when unknown
pub fn country_timezone(country: &str) -> &'static str {
    let country = country.trim();
    COUNTRY_TIMEZONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, code)| *code)
        .unwrap_or("UTC")
}

/// Absolute hour difference between two timezone codes
pub fn hour_difference(timezone1: &str, timezone2: &str) -> f64 {
    (timezone_offset_hours(timezone1) - timezone_offset_hours(timezone2)).abs()
}

/// A local 09:00-17:00 workday placed on the shared UTC timeline as
/// `9 + offset .. 17 + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkdayWindow {
    pub start: f64,
    pub end: f64,
}

impl WorkdayWindow {
    pub fn for_offset(offset: f64) -> Self {
        Self {
            start: WORKDAY_START_HOUR + offset,
            end: WORKDAY_END_HOUR + offset,
        }
    }

    /// Bounds of the shared span; empty when `start >= end`
    #[inline]
    pub fn intersection(&self, other: &WorkdayWindow) -> (f64, f64) {
        (self.start.max(other.start), self.end.min(other.end))
    }

    #[inline]
    pub fn overlap_hours(&self, other: &WorkdayWindow) -> f64 {
        let (start, end) = self.intersection(other);
        (end - start).max(0.0)
    }
}

/// Hours during which both users' workdays coincide, in `[0, 8]`.
///
/// Zero when either profile has no timezone.
pub fn working_hours_overlap(profile1: &UserProfile, profile2: &UserProfile) -> f64 {
    match (profile_offset(profile1), profile_offset(profile2)) {
        (Some(offset1), Some(offset2)) => {
            WorkdayWindow::for_offset(offset1).overlap_hours(&WorkdayWindow::for_offset(offset2))
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, tz: &str) -> UserProfile {
        UserProfile::new(id).with_timezone(tz)
    }

    #[test]
    fn test_table_offsets() {
        assert_eq!(timezone_offset_hours("UTC"), 0.0);
        assert_eq!(timezone_offset_hours("EST"), -5.0);
        assert_eq!(timezone_offset_hours("PST"), -8.0);
        assert_eq!(timezone_offset_hours("IST"), 5.5);
        assert_eq!(timezone_offset_hours("NZST"), 12.0);
        assert_eq!(timezone_offset_hours("jst"), 9.0);
    }

    #[test]
    fn test_unknown_code_is_utc() {
        assert_eq!(timezone_offset_hours("Mars/Olympus"), 0.0);
        assert_eq!(timezone_offset_hours("XYZ"), 0.0);
        assert_eq!(timezone_offset_hours("UTC+99"), 0.0);
    }

    #[test]
    fn test_fixed_offset_notation() {
        assert_eq!(timezone_offset_hours("UTC+3"), 3.0);
        assert_eq!(timezone_offset_hours("utc-4"), -4.0);
        assert_eq!(timezone_offset_hours("GMT+5:30"), 5.5);
        assert_eq!(timezone_offset_hours("UTC-3:30"), -3.5);
        assert_eq!(fixed_offset("UTC3"), None);
        assert_eq!(fixed_offset("UTC+5:75"), None);
    }

    #[test]
    fn test_iana_names() {
        assert_eq!(timezone_offset_hours("Asia/Tokyo"), 9.0);
        assert_eq!(timezone_offset_hours("Asia/Kolkata"), 5.5);
        // Reference instant is in northern winter
        assert_eq!(timezone_offset_hours("America/New_York"), -5.0);
    }

    #[test]
    fn test_same_zone_full_overlap() {
        assert_eq!(working_hours_overlap(&user("a", "UTC"), &user("b", "GMT")), 8.0);
    }

    #[test]
    fn test_partial_overlap() {
        // 9..17 vs 10..18
        assert_eq!(working_hours_overlap(&user("a", "UTC"), &user("b", "CET")), 7.0);
        // 9..17 vs 14.5..22.5
        assert_eq!(working_hours_overlap(&user("a", "UTC"), &user("b", "IST")), 2.5);
    }

    #[test]
    fn test_no_overlap() {
        // 4..12 vs 1..9 overlaps, 4..12 vs 18..26 does not
        assert_eq!(working_hours_overlap(&user("a", "EST"), &user("b", "PST")), 5.0);
        assert_eq!(working_hours_overlap(&user("a", "EST"), &user("b", "JST")), 0.0);
    }

    #[test]
    fn test_missing_timezone_is_zero() {
        let with_tz = user("a", "UTC");
        let without = UserProfile::new("b");
        let blank = user("c", "   ");

        assert_eq!(working_hours_overlap(&with_tz, &without), 0.0);
        assert_eq!(working_hours_overlap(&without, &with_tz), 0.0);
        assert_eq!(working_hours_overlap(&with_tz, &blank), 0.0);
    }

    #[test]
    fn test_overlap_bounded_and_symmetric() {
        let codes: Vec<&str> = TIMEZONE_OFFSETS.iter().map(|(c, _)| *c).collect();
        for a in &codes {
            for b in &codes {
                let ab = working_hours_overlap(&user("a", a), &user("b", b));
                let ba = working_hours_overlap(&user("b", b), &user("a", a));
                assert!((0.0..=MAX_OVERLAP_HOURS).contains(&ab), "{} / {} -> {}", a, b, ab);
                assert_eq!(ab, ba);
            }
        }
    }

    #[test]
    fn test_hour_difference() {
        assert_eq!(hour_difference("EST", "PST"), 3.0);
        assert_eq!(hour_difference("PST", "EST"), 3.0);
        assert_eq!(hour_difference("UTC", "IST"), 5.5);
    }

    #[test]
    fn test_country_timezone() {
        assert_eq!(country_timezone("Japan"), "JST");
        assert_eq!(country_timezone("new zealand"), "NZST");
        assert_eq!(country_timezone("Atlantis"), "UTC");
    }
}
