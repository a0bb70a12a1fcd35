//! Keeps the platform's notification schedule in line with timer state.
//!
//! The scheduler never owns timers. It is handed a timer snapshot and makes the
//! outstanding notifications match it: reminders for every fire time the
//! recurrence expander produces, and at most one live countdown notification
//! per running timer.
//!
//! ## Identifier index
//!
//! Reminder identifiers are tracked in a `timer id → identifiers` index so a
//! reschedule or cancel does not have to list every outstanding notification.
//! The index is seeded once from the platform's outstanding set (which may
//! hold notifications scheduled by an earlier run) and maintained from then
//! on.

use crate::libs::messages::Message;
use crate::libs::notification::{completion_identifier, running_identifier, NotificationCenter, NotificationContent, NotificationKind, ScheduledNotification};
use crate::libs::recurrence::expand_timer;
use crate::libs::timer::{Timer, TimerId};
use crate::msg_debug;
use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use parking_lot::Mutex;
use std::collections::HashMap;

pub struct NotificationScheduler<N> {
    center: N,
    index: Mutex<Option<HashMap<TimerId, Vec<String>>>>,
}

impl<N: NotificationCenter> NotificationScheduler<N> {
    pub fn new(center: N) -> Self {
        NotificationScheduler {
            center,
            index: Mutex::new(None),
        }
    }

    pub fn center(&self) -> &N {
        &self.center
    }

    pub async fn request_permissions(&self) -> Result<bool> {
        self.center.request_permissions().await
    }

    /// Replaces the timer's reminders with a fresh expansion from `now`.
    ///
    /// Disabled timers are left untouched. Returns the number of reminders
    /// scheduled.
    pub async fn schedule_timer_notifications(&self, timer: &Timer, now: NaiveDateTime) -> Result<usize> {
        if !timer.enabled {
            return Ok(0);
        }

        self.cancel_timer_notifications(&timer.id).await?;

        let content = NotificationContent::reminder(timer);
        let mut identifiers = Vec::new();
        for fire_at in expand_timer(timer, now) {
            match self.center.schedule(content.clone(), fire_at).await {
                Ok(identifier) => identifiers.push(identifier),
                Err(e) => {
                    self.remember(&timer.id, identifiers);
                    return Err(e);
                }
            }
        }

        let count = identifiers.len();
        self.remember(&timer.id, identifiers);
        msg_debug!(Message::NotificationsScheduled {
            name: timer.name.clone(),
            count,
        });
        Ok(count)
    }

    /// Cancels every reminder tagged with `timer_id`. Idempotent.
    pub async fn cancel_timer_notifications(&self, timer_id: &str) -> Result<usize> {
        self.seed_index().await?;

        let identifiers = self.index.lock().as_mut().and_then(|index| index.remove(timer_id)).unwrap_or_default();

        for (position, identifier) in identifiers.iter().enumerate() {
            if let Err(e) = self.center.cancel(identifier).await {
                self.remember(timer_id, identifiers[position..].to_vec());
                return Err(e);
            }
        }

        msg_debug!(Message::NotificationsCancelled {
            timer_id: timer_id.to_string(),
            count: identifiers.len(),
        });
        Ok(identifiers.len())
    }

    /// Schedules one extra reminder `minutes` after `now`.
    pub async fn snooze(&self, timer: &Timer, now: NaiveDateTime, minutes: u32) -> Result<String> {
        self.seed_index().await?;
        let fire_at = now + Duration::minutes(minutes as i64);
        let identifier = self.center.schedule(NotificationContent::reminder(timer), fire_at).await?;
        self.remember(&timer.id, vec![identifier.clone()]);
        Ok(identifier)
    }

    pub async fn cancel_all_notifications(&self) -> Result<()> {
        self.center.cancel_all().await?;
        *self.index.lock() = Some(HashMap::new());
        Ok(())
    }

    pub async fn scheduled_notifications(&self) -> Result<Vec<ScheduledNotification>> {
        self.center.scheduled().await
    }

    pub async fn show_running_timer_notification(&self, timer: &Timer) -> Result<()> {
        self.center.present(&running_identifier(&timer.id), NotificationContent::running(timer)).await
    }

    /// Swaps the live countdown notification for one showing the current
    /// remaining time. The replacement is always silent.
    pub async fn update_running_timer_notification(&self, timer: &Timer) -> Result<()> {
        let identifier = running_identifier(&timer.id);
        self.center.dismiss(&identifier).await?;
        self.center.present(&identifier, NotificationContent::running(timer)).await
    }

    pub async fn cancel_running_timer_notification(&self, timer_id: &str) -> Result<()> {
        self.center.dismiss(&running_identifier(timer_id)).await
    }

    pub async fn show_timer_completion_notification(&self, timer: &Timer) -> Result<()> {
        self.center.present(&completion_identifier(&timer.id), NotificationContent::completion(timer)).await
    }

    pub async fn dismiss(&self, identifier: &str) -> Result<()> {
        self.center.dismiss(identifier).await
    }

    async fn seed_index(&self) -> Result<()> {
        if self.index.lock().is_some() {
            return Ok(());
        }

        let outstanding = self.center.scheduled().await?;
        let mut seeded: HashMap<TimerId, Vec<String>> = HashMap::new();
        for notification in outstanding {
            if notification.content.data.action.unwrap_or(NotificationKind::Reminder) == NotificationKind::Reminder {
                seeded.entry(notification.content.data.timer_id).or_default().push(notification.identifier);
            }
        }

        let mut index = self.index.lock();
        if index.is_none() {
            *index = Some(seeded);
        }
        Ok(())
    }

    fn remember(&self, timer_id: &str, identifiers: Vec<String>) {
        if identifiers.is_empty() {
            return;
        }
        let mut index = self.index.lock();
        index.get_or_insert_with(HashMap::new).entry(timer_id.to_string()).or_default().extend(identifiers);
    }
}
