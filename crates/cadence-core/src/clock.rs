//! Calendar-day and ISO-week helpers.
//!
//! All "day" comparisons in the sync engine use whole calendar days in the
//! system time zone, never raw timestamps. Weeks follow ISO 8601: they start
//! on Monday and week 1 is the week containing the year's first Thursday.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan, Zoned};

use crate::error::{BoardError, Result};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Today's calendar date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Yesterday's calendar date in the system time zone.
pub fn yesterday() -> Date {
    today() - 1.day()
}

/// The ISO week key for a date, e.g. `2026-W07`.
///
/// The year component is the ISO week-numbering year, which can differ from
/// the calendar year around January 1st.
pub fn iso_week_key(day: Date) -> String {
    let wd = day.iso_week_date();
    format!("{}-W{:02}", wd.year(), wd.week())
}

/// Monday of the week identified by a period key like `2026-W09`.
pub fn monday_of_week(period_key: &str) -> Result<Date> {
    let (year, week) = parse_period_key(period_key)?;

    // January 4th is always inside ISO week 1.
    let jan4 = Date::new(year, 1, 4).map_err(|e| {
        BoardError::invalid_input("period_key", format!("invalid week year: {e}"))
    })?;
    let to_monday = i32::from(jan4.weekday().to_monday_zero_offset());
    Ok(jan4 - to_monday.days() + ((week - 1) * 7).days())
}

/// Sunday of the week identified by a period key. Always Monday + 6 days.
pub fn sunday_of_week(period_key: &str) -> Result<Date> {
    Ok(monday_of_week(period_key)? + 6.days())
}

/// Human-readable banner for a period key, e.g. `Week 09 · Feb 23 – Mar 1`.
pub fn week_date_range(period_key: &str) -> Result<String> {
    let monday = monday_of_week(period_key)?;
    let sunday = monday + 6.days();
    let (_, week) = parse_period_key(period_key)?;
    Ok(format!(
        "Week {:02} · {} {} – {} {}",
        week,
        MONTH_ABBR[monday.month() as usize - 1],
        monday.day(),
        MONTH_ABBR[sunday.month() as usize - 1],
        sunday.day(),
    ))
}

/// Whether a timestamp falls on the given calendar day in the system time
/// zone. Absent timestamps never match.
pub fn same_calendar_day(ts: Option<Timestamp>, day: Date) -> bool {
    ts.is_some_and(|t| t.to_zoned(TimeZone::system()).date() == day)
}

/// Reinterprets a timestamp that encodes a pure calendar date (stored as
/// midnight UTC) using its UTC calendar fields.
///
/// Reading such a value through the local calendar shifts it back one day in
/// any zone with a negative UTC offset.
pub fn normalize_date_only(ts: Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

fn parse_period_key(period_key: &str) -> Result<(i16, i32)> {
    let invalid = || {
        BoardError::invalid_input(
            "period_key",
            format!("expected YYYY-Www, got '{period_key}'"),
        )
    };
    let (year_str, week_str) = period_key.split_once("-W").ok_or_else(invalid)?;
    let year: i16 = year_str.parse().map_err(|_| invalid())?;
    let week: i32 = week_str.parse().map_err(|_| invalid())?;
    if !(1..=53).contains(&week) {
        return Err(invalid());
    }
    Ok((year, week))
}
