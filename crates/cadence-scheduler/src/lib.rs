//! `cadence-scheduler` — in-process recurring task scheduler.
//!
//! # Overview
//!
//! Each `schedule_*` call spawns one detached Tokio task that computes the
//! next fire instant, sleeps until it arrives, invokes the callback, and
//! repeats. All state lives in memory; nothing is persisted and a schedule
//! that misses occurrences while the process is stopped runs once on the
//! next anchor, not once per missed occurrence.
//!
//! There is deliberately no stop or cancel handle: once started, a schedule
//! runs until the process exits. Callers that need a bounded lifetime should
//! gate the task body themselves.
//!
//! # Strategies
//!
//! | Strategy   | Behaviour                                                    |
//! |------------|--------------------------------------------------------------|
//! | `Daily`    | Fire at HH:MM local time every day                           |
//! | `Weekly`   | Fire at HH:MM local time on a specific weekday               |
//! | `Monthly`  | Fire on the last working day ≤ `max_day`, skipping holidays  |
//! | `Periodic` | Fixed cadence every N seconds, seeded by a 12-char start mask, at most `max_workers` invocations in flight |
//!
//! Waiting is a degrading-interval poll loop (12 h naps two days out, down
//! to 1 s naps in the final minute) rather than a single long sleep, so the
//! runner re-reads the wall clock often enough to self-correct after system
//! sleep or manual clock changes.

pub mod anchor;
pub mod engine;
pub mod error;
pub mod mask;
pub mod types;
pub mod wait;

pub use engine::{
    schedule_daily, schedule_monthly, schedule_periodic, schedule_weekly, spawn_schedule,
};
pub use error::{Result, SchedulerError};
pub use mask::{parse_start_mask, resolve_start_mask};
pub use types::Schedule;
