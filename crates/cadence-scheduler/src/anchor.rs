//! Next-run computation for the calendar strategies.
//!
//! Pure functions of a supplied `now`, so runner loops and tests share the
//! same logic. Every returned anchor is strictly after `now`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Smallest instant strictly after `now` with the given wall time.
///
/// `None` only when `hour`/`minute` are out of range.
pub fn next_daily(now: NaiveDateTime, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let candidate = now.date().and_hms_opt(hour, minute, 0)?;
    if candidate > now {
        Some(candidate)
    } else {
        // Today's window has passed (or is exactly now) — tomorrow.
        Some(candidate + chrono::Duration::days(1))
    }
}

/// Next occurrence of `day` at the given wall time strictly after `now`,
/// inclusive of today when the time has not yet passed.
pub fn next_weekly(now: NaiveDateTime, day: Weekday, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let mut candidate = now.date().and_hms_opt(hour, minute, 0)?;
    while candidate.weekday() != day || candidate <= now {
        candidate += chrono::Duration::days(1);
    }
    Some(candidate)
}

/// Anchor for the monthly strategy: the latest day `<= max_day` in the
/// current month that is neither a weekend day nor in `holidays`, at the
/// given wall time. If that instant is not after `now`, the search moves to
/// the next month (December wraps to January of the next year).
///
/// Holidays match by year and day-of-year; their time of day is ignored.
pub fn next_monthly(
    now: NaiveDateTime,
    max_day: u32,
    hour: u32,
    minute: u32,
    holidays: &[NaiveDate],
) -> Option<NaiveDateTime> {
    let (mut year, mut month) = (now.year(), now.month());
    let mut anchor = last_working_day(year, month, max_day, holidays)?.and_hms_opt(hour, minute, 0)?;
    if anchor <= now {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
        anchor = last_working_day(year, month, max_day, holidays)?.and_hms_opt(hour, minute, 0)?;
    }
    Some(anchor)
}

/// Descending search `max_day..=1` for a non-weekend, non-holiday day.
/// Days the month does not have (e.g. the 31st of April) are skipped. When
/// every candidate is blocked, the 1st of the month is returned regardless
/// of weekend/holiday status so the schedule never fails to produce a date.
fn last_working_day(year: i32, month: u32, max_day: u32, holidays: &[NaiveDate]) -> Option<NaiveDate> {
    for day in (1..=max_day).rev() {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        if is_holiday(date, holidays) {
            continue;
        }
        return Some(date);
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn is_holiday(date: NaiveDate, holidays: &[NaiveDate]) -> bool {
    holidays
        .iter()
        .any(|h| h.year() == date.year() && h.ordinal() == date.ordinal())
}
