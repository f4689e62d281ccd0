//! Start mask parsing — the 12-character `YYMMDDHHmmss` partial timestamp
//! that seeds a periodic schedule's first firing.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Result, SchedulerError};

/// Mask length in bytes: six two-character fields (year, month, day, hour,
/// minute, second).
pub const MASK_LEN: usize = 12;

const PLACEHOLDER: &str = "--";
const ALL_PLACEHOLDERS: &str = "------------";

/// Resolve `mask` against the current local time.
pub fn parse_start_mask(mask: &str) -> Result<NaiveDateTime> {
    resolve_start_mask(mask, Local::now().naive_local())
}

/// Resolve `mask` against an explicit `now`.
///
/// Each field is either two decimal digits or the `--` placeholder meaning
/// "use the current value". A masked year resolves to the current year; an
/// explicit year is interpreted as `2000 + value`. The all-placeholder mask
/// means "run immediately".
///
/// If the composed instant is not strictly after `now`, it rolls forward by
/// one unit of the coarsest explicitly given field: month → one year,
/// day → one month, hour → one day, minute → one hour, otherwise one minute.
pub fn resolve_start_mask(mask: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    if mask.len() != MASK_LEN || !mask.is_ascii() {
        return Err(SchedulerError::MaskLength { len: mask.len() });
    }
    if mask == ALL_PLACEHOLDERS {
        return Ok(now);
    }

    let year_part = &mask[0..2];
    let year = if year_part == PLACEHOLDER {
        now.year()
    } else {
        let y: u32 = year_part
            .parse()
            .map_err(|_| SchedulerError::MaskField { field: "year" })?;
        2000 + y as i32
    };

    let month = field(mask, 1, "month", now.month(), 1, 12)?;
    let day = field(mask, 2, "day", now.day(), 1, 31)?;
    let hour = field(mask, 3, "hour", now.hour(), 0, 23)?;
    let minute = field(mask, 4, "minute", now.minute(), 0, 59)?;
    let second = field(mask, 5, "second", now.second(), 0, 59)?;

    let next = compose(year, month.value, day.value, hour.value, minute.value, second.value)
        .ok_or(SchedulerError::MaskField { field: "day" })?;
    if next > now {
        return Ok(next);
    }

    let rolled = if month.explicit {
        add_months(next, 12)
    } else if day.explicit {
        add_months(next, 1)
    } else if hour.explicit {
        next.checked_add_days(Days::new(1))
    } else if minute.explicit {
        next.checked_add_signed(chrono::Duration::hours(1))
    } else {
        // Roll-forward with only seconds explicit collapses to one minute.
        next.checked_add_signed(chrono::Duration::minutes(1))
    };
    rolled.ok_or_else(|| {
        SchedulerError::InvalidSchedule("start mask resolves outside the supported date range".into())
    })
}

struct Field {
    value: u32,
    explicit: bool,
}

fn field(
    mask: &str,
    idx: usize,
    name: &'static str,
    default: u32,
    min: u32,
    max: u32,
) -> Result<Field> {
    let part = &mask[idx * 2..idx * 2 + 2];
    if part == PLACEHOLDER {
        return Ok(Field {
            value: default,
            explicit: false,
        });
    }
    let value: u32 = part
        .parse()
        .map_err(|_| SchedulerError::MaskField { field: name })?;
    if value < min || value > max {
        return Err(SchedulerError::MaskField { field: name });
    }
    Ok(Field {
        value,
        explicit: true,
    })
}

/// Build an instant allowing `day` to exceed the month's length; overflow
/// days spill into the following month (calendar-addition normalisation).
fn compose(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(day) - 1))?;
    date.and_hms_opt(hour, minute, second)
}

/// Calendar month addition keeping the day-of-month, with the same overflow
/// normalisation as [`compose`].
fn add_months(dt: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let total = dt.month0() + months;
    let year = dt.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    compose(year, month, dt.day(), dt.hour(), dt.minute(), dt.second())
}
