//! Orchestration of user intents.
//!
//! [`TimerService`] owns the authoritative [`AppState`] and is the only API the
//! presentation layer talks to. Each intent follows the same shape:
//!
//! 1. **Update memory**: the action goes through [`reduce`] under the state
//!    lock, so callers observe the change immediately.
//! 2. **Persist**: the affected blob is written to the [`BlobStore`].
//! 3. **Reconcile notifications**: the [`NotificationScheduler`] is called
//!    with a snapshot of the changed timer.
//!
//! Steps 2 and 3 are not atomic with step 1. A failure in either is logged and
//! swallowed; the in-memory state is kept and the next successful write brings
//! storage back in line.
//!
//! Notification permission is checked at startup and when notifications are
//! switched on. Once the platform refuses it, reminder scheduling is skipped
//! until a later check grants it.
//!
//! Countdown notification effects (start, stop, tick, edit, delete) run one at
//! a time behind an async lock, so a slow tick can never put back the running
//! notification of a timer that was stopped meanwhile.

use crate::db::blob::BlobStore;
use crate::db::settings::SettingsRepository;
use crate::db::timers::TimerRepository;
use crate::libs::config::EngineConfig;
use crate::libs::countdown::{advance, TickOutcome};
use crate::libs::messages::Message;
use crate::libs::notification::{NotificationCenter, NotificationResponse, ResponseAction};
use crate::libs::scheduler::NotificationScheduler;
use crate::libs::settings::{AppSettings, Theme, TimeFormat};
use crate::libs::store::{reduce, Action, AppState};
use crate::libs::timer::{NewTimer, Timer, TimerId, ValidationErrors};
use crate::{msg_debug, msg_error, msg_warning};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Countdown lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Started(Timer),
    Stopped(Timer),
    /// The countdown reached zero. Sent exactly once per run.
    Completed(Timer),
}

pub struct TimerService<S, N> {
    state: Mutex<AppState>,
    timers: TimerRepository<S>,
    settings: SettingsRepository<S>,
    scheduler: NotificationScheduler<N>,
    config: EngineConfig,
    events: broadcast::Sender<TimerEvent>,
    effects: tokio::sync::Mutex<()>,
    permission_denied: AtomicBool,
}

impl<S: BlobStore, N: NotificationCenter> TimerService<S, N> {
    /// Creates a service with empty state.
    pub fn new(store: Arc<S>, center: N, config: EngineConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        TimerService {
            state: Mutex::new(AppState::default()),
            timers: TimerRepository::new(store.clone()),
            settings: SettingsRepository::new(store),
            scheduler: NotificationScheduler::new(center),
            config,
            events,
            effects: tokio::sync::Mutex::new(()),
            permission_denied: AtomicBool::new(false),
        }
    }

    /// Creates a service and restores the saved timers and settings.
    ///
    /// Unreadable blobs are logged and replaced by empty state.
    pub async fn load(store: Arc<S>, center: N, config: EngineConfig) -> Self {
        let service = Self::new(store, center, config);

        let timers = service.timers.load().await.unwrap_or_else(|e| {
            msg_error!(Message::TimersLoadFailed(e.to_string()));
            Vec::new()
        });
        let settings = service.settings.load().await.unwrap_or_else(|e| {
            msg_error!(Message::SettingsLoadFailed(e.to_string()));
            AppSettings::default()
        });

        service.dispatch(Action::SetTimers(timers));
        service.dispatch(Action::SetSettings(settings));
        service
    }

    /// Applies `action` to the in-memory state and returns the new state.
    pub fn dispatch(&self, action: Action) -> AppState {
        let mut state = self.state.lock();
        *state = reduce(std::mem::take(&mut *state), action);
        state.clone()
    }

    pub fn state(&self) -> AppState {
        self.state.lock().clone()
    }

    pub fn timers(&self) -> Vec<Timer> {
        self.state.lock().timers.clone()
    }

    pub fn timer(&self, id: &str) -> Option<Timer> {
        self.state.lock().timer(id).cloned()
    }

    pub fn settings(&self) -> AppSettings {
        self.state.lock().settings.clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &NotificationScheduler<N> {
        &self.scheduler
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    /// Validates and creates a new, enabled timer.
    pub async fn add_timer(&self, draft: NewTimer) -> Result<Timer, ValidationErrors> {
        draft.validate()?;

        let now = Utc::now();
        let (timer, timers) = {
            let mut state = self.state.lock();
            let timer = Timer::new(next_id(&state, now), draft, now);
            *state = reduce(std::mem::take(&mut *state), Action::Add(timer.clone()));
            (timer, state.timers.clone())
        };

        self.persist_timers(&timers).await;
        self.schedule(&timer).await;
        msg_debug!(Message::TimerCreated(timer.name.clone()));
        Ok(timer)
    }

    /// Replaces a timer's editable fields and reschedules its reminders.
    /// Returns `Ok(None)` for an unknown id.
    pub async fn update_timer(&self, id: &str, draft: NewTimer) -> Result<Option<Timer>, ValidationErrors> {
        draft.validate()?;
        let _effects = self.effects.lock().await;

        let Some(mut timer) = self.timer(id) else {
            return Ok(None);
        };
        timer.apply_edit(draft, Utc::now());
        let state = self.dispatch(Action::Update(timer.clone()));

        self.persist_timers(&state.timers).await;
        if timer.enabled {
            self.schedule(&timer).await;
        } else {
            self.cancel(&timer.id).await;
        }
        if timer.is_running() {
            if let Err(e) = self.scheduler.update_running_timer_notification(&timer).await {
                msg_error!(Message::RunningNotificationFailed(e.to_string()));
            }
        }
        msg_debug!(Message::TimerUpdated(timer.name.clone()));
        Ok(Some(timer))
    }

    /// Removes a timer and every notification it owns. Returns whether the
    /// timer existed.
    pub async fn delete_timer(&self, id: &str) -> bool {
        let _effects = self.effects.lock().await;
        let Some(timer) = self.timer(id) else {
            return false;
        };
        let state = self.dispatch(Action::Delete(id.to_string()));

        self.persist_timers(&state.timers).await;
        self.cancel(id).await;
        if timer.is_running() {
            if let Err(e) = self.scheduler.cancel_running_timer_notification(id).await {
                msg_error!(Message::RunningNotificationFailed(e.to_string()));
            }
        }
        msg_debug!(Message::TimerDeleted(timer.name));
        true
    }

    /// Flips `enabled`, scheduling or cancelling reminders to match.
    pub async fn toggle_timer(&self, id: &str) -> Option<Timer> {
        let state = self.dispatch(Action::Toggle {
            id: id.to_string(),
            at: Utc::now(),
        });
        let timer = state.timer(id).cloned()?;

        self.persist_timers(&state.timers).await;
        if timer.enabled {
            self.schedule(&timer).await;
        } else {
            self.cancel(id).await;
        }
        Some(timer)
    }

    /// Starts (or restarts) a countdown from the full duration.
    pub async fn start_timer(&self, id: &str) -> Option<Timer> {
        let _effects = self.effects.lock().await;
        let state = self.dispatch(Action::Start {
            id: id.to_string(),
            at: Utc::now(),
        });
        let timer = state.timer(id).cloned()?;

        if let Err(e) = self.scheduler.show_running_timer_notification(&timer).await {
            msg_error!(Message::RunningNotificationFailed(e.to_string()));
        }
        let _ = self.events.send(TimerEvent::Started(timer.clone()));
        msg_debug!(Message::TimerStarted(timer.name.clone()));
        Some(timer)
    }

    /// Stops a countdown without a completion notification.
    pub async fn stop_timer(&self, id: &str) -> Option<Timer> {
        let _effects = self.effects.lock().await;
        let was_running = self.timer(id)?.is_running();
        let state = self.dispatch(Action::Stop {
            id: id.to_string(),
            at: Utc::now(),
        });
        let timer = state.timer(id).cloned()?;

        if let Err(e) = self.scheduler.cancel_running_timer_notification(id).await {
            msg_error!(Message::RunningNotificationFailed(e.to_string()));
        }
        if was_running {
            let _ = self.events.send(TimerEvent::Stopped(timer.clone()));
            msg_debug!(Message::TimerStopped(timer.name.clone()));
        }
        Some(timer)
    }

    /// Runs one countdown tick at `at`.
    ///
    /// All running timers are decremented in one step under the state lock,
    /// so a tick cannot overwrite a concurrent edit. Notification updates
    /// follow under the effects lock, which a concurrent stop or delete waits
    /// on.
    pub async fn tick(&self, at: DateTime<Utc>) -> TickOutcome {
        let _effects = self.effects.lock().await;
        let outcome = {
            let mut state = self.state.lock();
            if state.running_timers().next().is_none() {
                return TickOutcome::default();
            }
            let mut timers = state.timers.clone();
            let outcome = advance(&mut timers, at);
            *state = reduce(std::mem::take(&mut *state), Action::SetTimers(timers));
            outcome
        };

        for timer in &outcome.completed {
            if let Err(e) = self.scheduler.show_timer_completion_notification(timer).await {
                msg_error!(Message::CompletionNotificationFailed(e.to_string()));
            }
            if let Err(e) = self.scheduler.cancel_running_timer_notification(&timer.id).await {
                msg_error!(Message::RunningNotificationFailed(e.to_string()));
            }
            let _ = self.events.send(TimerEvent::Completed(timer.clone()));
            msg_debug!(Message::TimerCompleted(timer.name.clone()));
        }

        for timer in &outcome.running {
            if let Err(e) = self.scheduler.update_running_timer_notification(timer).await {
                msg_error!(Message::RunningNotificationFailed(e.to_string()));
            }
        }

        outcome
    }

    /// Re-expands the reminders of one timer from the current time.
    pub async fn refresh_schedule(&self, id: &str) {
        if let Some(timer) = self.timer(id) {
            self.schedule(&timer).await;
        }
    }

    /// Re-expands the reminders of every enabled timer.
    pub async fn reschedule_all(&self) {
        for timer in self.timers().iter().filter(|timer| timer.enabled) {
            self.schedule(timer).await;
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> AppSettings {
        let settings = AppSettings { theme, ..self.settings() };
        self.save_settings(settings).await
    }

    pub async fn set_time_format(&self, time_format: TimeFormat) -> AppSettings {
        let settings = AppSettings { time_format, ..self.settings() };
        self.save_settings(settings).await
    }

    /// Asks the platform for permission and records the answer. While it is
    /// refused, reminder scheduling is skipped.
    pub async fn check_permissions(&self) -> bool {
        let granted = self.scheduler.request_permissions().await.unwrap_or_else(|e| {
            msg_error!(Message::NotificationPermissionCheckFailed(e.to_string()));
            false
        });
        self.permission_denied.store(!granted, Ordering::SeqCst);
        if !granted {
            msg_warning!(Message::NotificationsPermissionDenied);
        }
        granted
    }

    /// Records the notifications preference and returns the resulting value.
    ///
    /// Switching on checks permission first and leaves the preference off
    /// when it is refused; a grant reschedules every enabled timer. Switching
    /// off only records the preference.
    pub async fn set_notifications_enabled(&self, enabled: bool) -> bool {
        if enabled && !self.check_permissions().await {
            return self.settings().notifications_enabled;
        }

        let settings = AppSettings {
            notifications_enabled: enabled,
            ..self.settings()
        };
        self.save_settings(settings).await;

        if enabled {
            self.reschedule_all().await;
        }
        enabled
    }

    /// Reacts to a button pressed on a delivered notification.
    pub async fn handle_notification_response(&self, response: NotificationResponse) {
        let Some(data) = response.data else {
            msg_warning!(Message::NotificationResponseMissingData(response.identifier));
            return;
        };

        match response.action {
            ResponseAction::StartTimer => {
                self.start_timer(&data.timer_id).await;
            }
            ResponseAction::StopTimer => {
                self.stop_timer(&data.timer_id).await;
            }
            ResponseAction::SnoozeTimer => self.snooze(&data.timer_id, &response.identifier).await,
            ResponseAction::ClearNotification => {
                if let Err(e) = self.scheduler.dismiss(&response.identifier).await {
                    msg_error!(Message::NotificationCancelFailed(e.to_string()));
                }
            }
            ResponseAction::Default => {}
        }
    }

    async fn snooze(&self, timer_id: &TimerId, identifier: &str) {
        let Some(timer) = self.timer(timer_id) else {
            msg_warning!(Message::TimerNotFound(timer_id.clone()));
            return;
        };
        if !timer.enabled || self.permission_denied.load(Ordering::SeqCst) {
            return;
        }

        if let Err(e) = self.scheduler.dismiss(identifier).await {
            msg_error!(Message::NotificationCancelFailed(e.to_string()));
        }
        match self.scheduler.snooze(&timer, local_now(), self.config.snooze_minutes).await {
            Ok(_) => msg_debug!(Message::TimerSnoozed {
                name: timer.name.clone(),
                minutes: self.config.snooze_minutes,
            }),
            Err(e) => msg_error!(Message::NotificationScheduleFailed(e.to_string())),
        }
    }

    async fn schedule(&self, timer: &Timer) {
        if self.permission_denied.load(Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.scheduler.schedule_timer_notifications(timer, local_now()).await {
            msg_error!(Message::NotificationScheduleFailed(e.to_string()));
        }
    }

    async fn cancel(&self, id: &str) {
        if let Err(e) = self.scheduler.cancel_timer_notifications(id).await {
            msg_error!(Message::NotificationCancelFailed(e.to_string()));
        }
    }

    async fn persist_timers(&self, timers: &[Timer]) {
        if let Err(e) = self.timers.save(timers).await {
            msg_error!(Message::TimersSaveFailed(e.to_string()));
        }
    }

    async fn save_settings(&self, settings: AppSettings) -> AppSettings {
        let state = self.dispatch(Action::SetSettings(settings));
        if let Err(e) = self.settings.save(&state.settings).await {
            msg_error!(Message::SettingsSaveFailed(e.to_string()));
        }
        state.settings
    }
}

/// Creation-time id: the millisecond timestamp, bumped past any id in use.
fn next_id(state: &AppState, at: DateTime<Utc>) -> TimerId {
    let mut candidate = at.timestamp_millis();
    while state.timer(&candidate.to_string()).is_some() {
        candidate += 1;
    }
    candidate.to_string()
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
