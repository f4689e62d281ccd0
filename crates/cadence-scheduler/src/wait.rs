//! Adaptive waiting — block until a target local instant with a
//! degrading-interval poll loop instead of one long sleep.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};

/// Sleep until the local wall clock reaches `target`.
///
/// Returns immediately if `target` is already past. Otherwise naps repeatedly,
/// each nap sized from the remaining distance (see [`nap_for`]) and followed
/// by a fresh clock read, so the loop self-corrects after wall-clock
/// discontinuities such as system sleep/wake or a manual clock change.
pub async fn wait_until(target: NaiveDateTime) {
    loop {
        let remaining = target - Local::now().naive_local();
        if remaining <= chrono::Duration::zero() {
            return;
        }
        tokio::time::sleep(nap_for(remaining)).await;
    }
}

/// Nap length for a given remaining distance: coarse far out, fine close in.
///
/// The graduated schedule trades a handful of wake-ups per day against
/// second-level firing precision in the final minute.
pub(crate) fn nap_for(remaining: chrono::Duration) -> Duration {
    if remaining > chrono::Duration::hours(48) {
        Duration::from_secs(12 * 60 * 60)
    } else if remaining > chrono::Duration::hours(12) {
        Duration::from_secs(3 * 60 * 60)
    } else if remaining > chrono::Duration::hours(3) {
        Duration::from_secs(60 * 60)
    } else if remaining > chrono::Duration::hours(1) {
        Duration::from_secs(15 * 60)
    } else if remaining > chrono::Duration::minutes(10) {
        Duration::from_secs(5 * 60)
    } else if remaining > chrono::Duration::minutes(1) {
        Duration::from_secs(30)
    } else {
        Duration::from_secs(1)
    }
}
