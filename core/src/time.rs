//! Time related utils.

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::TimeDelta;
use chrono::TimeZone;
use chrono::Timelike;
use chrono::Utc;

use crate::Error;
use crate::Result;

/// DateTime is a point in time, always in UTC.
pub type DateTime = chrono::DateTime<Utc>;

// Hard-coded English names so that formatting never consults locale data.
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Create a new DateTime with the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a date into an RFC-1123 http date, like `Tue, 03 Jun 2025 11:05:30 GMT`.
///
/// The day-of-week is always emitted, day/hour/minute/second are always
/// zero-padded to two digits and the year to four. The input is UTC, so
/// the zone is always rendered as `GMT`.
///
/// Only years 0000 to 9999 are supported; anything else cannot be
/// rendered with a four digit year and is rejected.
pub fn format_http_date(t: DateTime) -> Result<String> {
    if !(0..=9999).contains(&t.year()) {
        return Err(Error::malformed_date(format!(
            "year {} is outside the supported range 0000-9999",
            t.year()
        )));
    }

    Ok(format!(
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
        WEEKDAYS[t.weekday().num_days_from_monday() as usize],
        t.day(),
        MONTHS[t.month0() as usize],
        t.year(),
        t.hour(),
        t.minute(),
        t.second()
    ))
}

/// Parse an RFC-1123 http date into a [`DateTime`].
///
/// Accepted grammar: `[Www, ]dd Mon yyyy HH:mm[:ss] zzzz`.
///
/// - The day-of-week is optional and matched case-insensitively; it is
///   validated against the table but not used for resolution.
/// - The day may be a single digit (`3 Jun 2008`), month names are matched
///   case-insensitively, the year must be exactly four digits.
/// - Seconds are optional.
/// - The zone is `GMT` (case-insensitive) or a numeric `+HHMM`/`-HHMM`
///   offset. Named zones other than GMT (`UT`, `Z`, `EST`, ...) are not
///   handled.
///
/// Resolution is lenient: out-of-range fields carry into the next larger
/// unit, so `32 Jan` resolves to `1 Feb` and hour 24 to midnight of the
/// next day. Anything outside the grammar fails with a malformed date
/// error, never a silent default.
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    let err = || Error::malformed_date(format!("`{s}` is not a valid rfc1123 date"));

    let mut rest = s.trim();

    if let Some((dow, tail)) = rest.split_once(',') {
        if !WEEKDAYS.iter().any(|d| d.eq_ignore_ascii_case(dow.trim())) {
            return Err(err());
        }
        rest = tail.trim_start();
    }

    let mut fields = rest.split_ascii_whitespace();

    let day = fields.next().and_then(clock_field).ok_or_else(err)?;
    let month = fields
        .next()
        .and_then(|v| MONTHS.iter().position(|m| m.eq_ignore_ascii_case(v)))
        .ok_or_else(err)? as u32
        + 1;
    // Two-digit years are not handled.
    let year: i32 = fields
        .next()
        .filter(|v| v.len() == 4 && v.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|v| v.parse().ok())
        .ok_or_else(err)?;

    let mut clock = fields.next().ok_or_else(err)?.split(':');
    let hour = clock.next().and_then(clock_field).ok_or_else(err)?;
    let minute = clock.next().and_then(clock_field).ok_or_else(err)?;
    let second = match clock.next() {
        Some(v) => clock_field(v).ok_or_else(err)?,
        None => 0,
    };
    if clock.next().is_some() {
        return Err(err());
    }

    let offset = fields.next().and_then(zone_offset).ok_or_else(err)?;
    if fields.next().is_some() {
        return Err(err());
    }

    let base = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(err)?;
    let resolved = base
        + TimeDelta::try_days(day - 1).ok_or_else(err)?
        + TimeDelta::try_hours(hour).ok_or_else(err)?
        + TimeDelta::try_minutes(minute).ok_or_else(err)?
        + TimeDelta::try_seconds(second - offset).ok_or_else(err)?;

    Ok(Utc.from_utc_datetime(&resolved))
}

/// A clock field is one or two ascii digits.
fn clock_field(v: &str) -> Option<i64> {
    if v.is_empty() || v.len() > 2 || !v.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    v.parse().ok()
}

/// Zone offset in seconds: `GMT` or `+HHMM`/`-HHMM`.
fn zone_offset(v: &str) -> Option<i64> {
    if v.eq_ignore_ascii_case("GMT") {
        return Some(0);
    }

    let bs = v.as_bytes();
    if bs.len() != 5 || !bs[1..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let sign = match bs[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hh: i64 = v[1..3].parse().ok()?;
    let mm: i64 = v[3..5].parse().ok()?;

    Some(sign * (hh * 3600 + mm * 60))
}
