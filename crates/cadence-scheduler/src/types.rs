use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::mask;

/// Defines when and how often a scheduled task fires. All times are local.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// Every day at the given hour and minute.
    Daily { hour: u8, minute: u8 },

    /// Every week on `day` at the given hour and minute.
    Weekly { day: Weekday, hour: u8, minute: u8 },

    /// Once a month on the last working day, searching downward from
    /// `max_day` and skipping weekends and `holidays`. If every candidate
    /// day is blocked, the 1st of the month is used.
    Monthly {
        max_day: u8,
        hour: u8,
        minute: u8,
        #[serde(default)]
        holidays: Vec<NaiveDate>,
    },

    /// Fixed cadence every `interval_secs`, first firing seeded by
    /// `start_mask` (YYMMDDHHmmss, `--` per masked field), with at most
    /// `max_workers` invocations in flight at once.
    Periodic {
        interval_secs: u64,
        start_mask: String,
        max_workers: usize,
    },
}

impl Schedule {
    /// Check field ranges (and, for periodic, the start mask) before the
    /// schedule is spawned. The runner functions perform the same checks at
    /// start; callers driving schedules from config use this to report bad
    /// definitions with context.
    pub fn validate(&self) -> Result<()> {
        match self {
            Schedule::Daily { hour, minute } => check_time(*hour, *minute),
            Schedule::Weekly { hour, minute, .. } => check_time(*hour, *minute),
            Schedule::Monthly {
                max_day,
                hour,
                minute,
                ..
            } => {
                if !(1..=31).contains(max_day) {
                    return Err(SchedulerError::InvalidSchedule(format!(
                        "max_day {max_day} out of range 1-31"
                    )));
                }
                check_time(*hour, *minute)
            }
            Schedule::Periodic {
                interval_secs,
                start_mask,
                max_workers,
            } => {
                if *interval_secs == 0 {
                    return Err(SchedulerError::InvalidInterval);
                }
                if i64::try_from(*interval_secs)
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .is_none()
                {
                    return Err(SchedulerError::InvalidSchedule(format!(
                        "interval_secs {interval_secs} out of range"
                    )));
                }
                if *max_workers == 0 {
                    return Err(SchedulerError::InvalidSchedule(
                        "max_workers must be at least 1".into(),
                    ));
                }
                mask::parse_start_mask(start_mask).map(drop)
            }
        }
    }
}

fn check_time(hour: u8, minute: u8) -> Result<()> {
    if hour > 23 {
        return Err(SchedulerError::InvalidSchedule(format!(
            "hour {hour} out of range 0-23"
        )));
    }
    if minute > 59 {
        return Err(SchedulerError::InvalidSchedule(format!(
            "minute {minute} out of range 0-59"
        )));
    }
    Ok(())
}
