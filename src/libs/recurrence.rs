//! Expands a timer's repeat rule into concrete fire times.
//!
//! Every trigger time starts from the next occurrence strictly after `now`
//! (a time equal to `now` counts as already passed). Daily timers produce
//! that single occurrence and are re-expanded once it fires. Weekday, weekend
//! and custom timers walk a fixed [`LOOKAHEAD_DAYS`] window from that first
//! occurrence and keep the days their frequency allows.

use crate::libs::time::TimeOfDay;
use crate::libs::timer::{Frequency, Timer};
use chrono::{Datelike, Duration, NaiveDateTime};
use std::collections::BTreeSet;

pub const LOOKAHEAD_DAYS: i64 = 7;

/// The first occurrence of `time` strictly after `now`.
pub fn first_fire(time: TimeOfDay, now: NaiveDateTime) -> NaiveDateTime {
    let candidate = now.date().and_time(time.as_naive());
    if candidate <= now {
        candidate + Duration::days(1)
    } else {
        candidate
    }
}

/// Fire times for one trigger time, in ascending order.
pub fn expand(frequency: Frequency, custom_days: Option<&BTreeSet<u8>>, time: TimeOfDay, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    let first = first_fire(time, now);

    match frequency {
        Frequency::Daily => vec![first],
        Frequency::Weekdays | Frequency::Weekends | Frequency::Custom => (0..LOOKAHEAD_DAYS)
            .map(|offset| first + Duration::days(offset))
            .filter(|candidate| frequency.includes(candidate.weekday(), custom_days))
            .collect(),
    }
}

/// Union of the fire times of every trigger time on the timer, sorted and
/// without duplicates.
pub fn expand_timer(timer: &Timer, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    let mut fire_times: Vec<NaiveDateTime> = timer
        .times
        .iter()
        .flat_map(|time| expand(timer.frequency, timer.custom_days.as_ref(), *time, now))
        .collect();
    fire_times.sort();
    fire_times.dedup();
    fire_times
}
