//! Schedule runners — one detached Tokio task per started schedule.
//!
//! Every `schedule_*` function returns immediately; the runner loop it
//! spawns lives until the process exits. Configuration problems are logged
//! and the runner simply never starts — nothing propagates to the caller.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Weekday};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::anchor;
use crate::mask;
use crate::types::Schedule;
use crate::wait::wait_until;

/// Fire `task` every day at `hour`:`minute` local time.
pub fn schedule_daily<F>(hour: u8, minute: u8, task: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let task: Arc<dyn Fn() + Send + Sync> = Arc::new(task);
    tokio::spawn(async move {
        info!(hour, minute, "daily schedule started");
        loop {
            let now = Local::now().naive_local();
            let Some(next) = anchor::next_daily(now, u32::from(hour), u32::from(minute)) else {
                error!(hour, minute, "daily schedule: time of day out of range — runner stopped");
                return;
            };
            wait_until(next).await;
            run_blocking(Arc::clone(&task)).await;
        }
    });
}

/// Fire `task` every week on `day` at `hour`:`minute` local time.
pub fn schedule_weekly<F>(day: Weekday, hour: u8, minute: u8, task: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let task: Arc<dyn Fn() + Send + Sync> = Arc::new(task);
    tokio::spawn(async move {
        info!(%day, hour, minute, "weekly schedule started");
        loop {
            let now = Local::now().naive_local();
            let Some(next) = anchor::next_weekly(now, day, u32::from(hour), u32::from(minute))
            else {
                error!(%day, hour, minute, "weekly schedule: time of day out of range — runner stopped");
                return;
            };
            wait_until(next).await;
            run_blocking(Arc::clone(&task)).await;
        }
    });
}

/// Fire `task` monthly on the last working day `<= max_day`, skipping
/// weekends and `holidays` (matched by calendar date, time ignored).
pub fn schedule_monthly<F>(max_day: u8, hour: u8, minute: u8, holidays: Vec<NaiveDate>, task: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let task: Arc<dyn Fn() + Send + Sync> = Arc::new(task);
    tokio::spawn(async move {
        info!(max_day, hour, minute, holidays = holidays.len(), "monthly schedule started");
        loop {
            let now = Local::now().naive_local();
            let Some(next) = anchor::next_monthly(
                now,
                u32::from(max_day),
                u32::from(hour),
                u32::from(minute),
                &holidays,
            ) else {
                error!(max_day, hour, minute, "monthly schedule: definition out of range — runner stopped");
                return;
            };
            wait_until(next).await;
            run_blocking(Arc::clone(&task)).await;
        }
    });
}

/// Fire `task` every `interval_secs`, starting at the instant resolved from
/// `start_mask`, with at most `max_workers` invocations in flight.
///
/// The cadence is anchored: each cycle advances by exactly `interval_secs`
/// from the previous anchor, regardless of task duration. A firing that
/// arrives while all `max_workers` slots are busy is dropped — logged, not
/// queued, not retried.
///
/// A non-positive interval, `max_workers` of zero, or a malformed
/// `start_mask` is logged and the schedule never starts.
pub fn schedule_periodic<F>(interval_secs: u64, start_mask: &str, max_workers: usize, task: F)
where
    F: Fn() + Send + Sync + 'static,
{
    if interval_secs == 0 {
        error!("periodic schedule not started: interval must be greater than 0");
        return;
    }
    if max_workers == 0 {
        error!("periodic schedule not started: max_workers must be at least 1");
        return;
    }
    // Duration::seconds panics past i64::MAX milliseconds; reject absurd
    // intervals through the same logged-and-not-started path.
    let Some(step) = i64::try_from(interval_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
    else {
        error!(interval_secs, "periodic schedule not started: interval out of range");
        return;
    };
    let start = match mask::parse_start_mask(start_mask) {
        Ok(start) => start,
        Err(e) => {
            error!(mask = start_mask, "periodic schedule not started: {e}");
            return;
        }
    };

    let task: Arc<dyn Fn() + Send + Sync> = Arc::new(task);
    let gate = Arc::new(Semaphore::new(max_workers));
    tokio::spawn(async move {
        info!(interval_secs, max_workers, start = %start, "periodic schedule started");
        let mut next = start;
        wait_until(next).await;
        loop {
            if !dispatch(&gate, &task) {
                warn!("skipping periodic firing: too many running tasks");
            }
            // Advance from the previous anchor, not from now, so skipped or
            // slow firings never shift the cadence.
            next += step;
            wait_until(next).await;
        }
    });
}

/// Invoke the task on the blocking pool and wait for it to finish, so a
/// long-running callback never pins a runtime worker and stalls other
/// schedules' runners. A panicking task still takes its own runner down,
/// exactly as an inline invocation would.
async fn run_blocking(task: Arc<dyn Fn() + Send + Sync>) {
    if let Err(e) = tokio::task::spawn_blocking(move || task()).await {
        if e.is_panic() {
            std::panic::resume_unwind(e.into_panic());
        }
    }
}

/// Try to admit one firing: acquire a slot, run the task on the blocking
/// pool with its permit. The permit is released when it drops — on normal
/// completion and on panic alike — so the in-flight count never leaks.
/// Returns false when all slots are busy.
fn dispatch(gate: &Arc<Semaphore>, task: &Arc<dyn Fn() + Send + Sync>) -> bool {
    match Arc::clone(gate).try_acquire_owned() {
        Ok(permit) => {
            let task = Arc::clone(task);
            tokio::task::spawn_blocking(move || {
                task();
                drop(permit);
            });
            true
        }
        Err(_) => false,
    }
}

/// Start the runner matching a [`Schedule`] definition.
pub fn spawn_schedule<F>(schedule: Schedule, task: F)
where
    F: Fn() + Send + Sync + 'static,
{
    match schedule {
        Schedule::Daily { hour, minute } => schedule_daily(hour, minute, task),
        Schedule::Weekly { day, hour, minute } => schedule_weekly(day, hour, minute, task),
        Schedule::Monthly {
            max_day,
            hour,
            minute,
            holidays,
        } => schedule_monthly(max_day, hour, minute, holidays, task),
        Schedule::Periodic {
            interval_secs,
            start_mask,
            max_workers,
        } => schedule_periodic(interval_secs, &start_mask, max_workers, task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn admission_gate_drops_when_saturated() {
        let gate = Arc::new(Semaphore::new(2));
        let barrier = Arc::new(Barrier::new(3));
        let task: Arc<dyn Fn() + Send + Sync> = {
            let barrier = Arc::clone(&barrier);
            Arc::new(move || {
                barrier.wait();
            })
        };

        // Two firings fill both slots; the permits are taken synchronously
        // inside dispatch, so the third check cannot race the spawned tasks.
        assert!(dispatch(&gate, &task));
        assert!(dispatch(&gate, &task));
        assert!(!dispatch(&gate, &task), "third firing must be dropped, not queued");

        // Release both in-flight tasks and wait for their permits to return.
        barrier.wait();
        while gate.available_permits() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let noop: Arc<dyn Fn() + Send + Sync> = Arc::new(|| {});
        assert!(dispatch(&gate, &noop), "freed slots admit firings again");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn slow_task_does_not_stall_the_runtime_worker() {
        // A command-style task that blocks its thread must not pin the
        // (single) runtime worker: a timer scheduled alongside it has to
        // fire while the task is still running.
        let task: Arc<dyn Fn() + Send + Sync> =
            Arc::new(|| std::thread::sleep(Duration::from_millis(300)));

        let started = std::time::Instant::now();
        let ticker = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            std::time::Instant::now()
        });

        run_blocking(task).await;
        assert!(started.elapsed() >= Duration::from_millis(300));

        let ticked_at = ticker.await.unwrap();
        assert!(
            ticked_at - started < Duration::from_millis(200),
            "timer sharing the worker must fire while the task blocks"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn run_blocking_waits_for_the_task() {
        let ran = Arc::new(AtomicUsize::new(0));
        let task: Arc<dyn Fn() + Send + Sync> = {
            let ran = Arc::clone(&ran);
            Arc::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            })
        };
        run_blocking(task).await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn permit_returns_after_task_completes() {
        let gate = Arc::new(Semaphore::new(1));
        let ran = Arc::new(AtomicUsize::new(0));
        let task: Arc<dyn Fn() + Send + Sync> = {
            let ran = Arc::clone(&ran);
            Arc::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            })
        };

        assert!(dispatch(&gate, &task));
        while gate.available_permits() < 1 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert!(dispatch(&gate, &task));
    }
}
