//! In-memory application state and its pure transition function.
//!
//! [`reduce`] never performs I/O and never fails: an action naming a timer
//! that does not exist leaves the state unchanged. Persistence and
//! notification side effects belong to [`crate::libs::service`].

use crate::libs::settings::AppSettings;
use crate::libs::timer::{Timer, TimerId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub timers: Vec<Timer>,
    pub settings: AppSettings,
}

impl AppState {
    pub fn timer(&self, id: &str) -> Option<&Timer> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn running_timers(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter().filter(|timer| timer.is_running())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(Timer),
    Update(Timer),
    Delete(TimerId),
    Toggle { id: TimerId, at: DateTime<Utc> },
    Start { id: TimerId, at: DateTime<Utc> },
    Stop { id: TimerId, at: DateTime<Utc> },
    SetTimers(Vec<Timer>),
    SetSettings(AppSettings),
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::Add(timer) => {
            if state.timer(&timer.id).is_none() {
                state.timers.push(timer);
            }
        }
        Action::Update(timer) => {
            if let Some(existing) = find_mut(&mut state, &timer.id) {
                *existing = timer;
            }
        }
        Action::Delete(id) => state.timers.retain(|timer| timer.id != id),
        Action::Toggle { id, at } => {
            if let Some(timer) = find_mut(&mut state, &id) {
                timer.enabled = !timer.enabled;
                timer.updated_at = at;
            }
        }
        Action::Start { id, at } => {
            if let Some(timer) = find_mut(&mut state, &id) {
                timer.start(at);
            }
        }
        Action::Stop { id, at } => {
            if let Some(timer) = find_mut(&mut state, &id) {
                timer.stop(at);
            }
        }
        Action::SetTimers(timers) => state.timers = timers,
        Action::SetSettings(settings) => state.settings = settings,
    }
    state
}

fn find_mut<'a>(state: &'a mut AppState, id: &str) -> Option<&'a mut Timer> {
    state.timers.iter_mut().find(|timer| timer.id == id)
}
