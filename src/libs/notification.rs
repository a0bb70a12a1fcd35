//! Notification payloads and the platform notification seam.
//!
//! The platform notification subsystem is reached only through the
//! [`NotificationCenter`] trait. Every notification carries a
//! [`NotificationData`] payload tagging the owning timer so timer-scoped
//! cancellation and response handling can find it again.
//!
//! [`LocalNotificationCenter`] is an in-process implementation: it keeps the
//! outstanding schedule in memory, hands due entries out through
//! [`LocalNotificationCenter::take_due`] and can echo alerting notifications
//! to the console.

use crate::libs::messages::Message;
use crate::libs::time::format_countdown;
use crate::libs::timer::{Timer, TimerId};
use crate::msg_info;
use anyhow::Result;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

const RUNNING_IDENTIFIER_PREFIX: &str = "running-timer-";
const COMPLETED_IDENTIFIER_PREFIX: &str = "completed-timer-";

/// Distinguishes reminder alerts, live countdown updates and completions.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Running,
    Completed,
}

/// Payload attached to every notification.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub timer_id: TimerId,
    pub timer_name: String,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationKind>,
}

impl NotificationData {
    pub fn for_timer(timer: &Timer, kind: NotificationKind) -> Self {
        NotificationData {
            timer_id: timer.id.clone(),
            timer_name: timer.name.clone(),
            duration: timer.duration,
            action: Some(kind),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Default,
    High,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
    pub sound: bool,
    pub vibrate: bool,
    /// Sticky notifications cannot be swiped away by the user.
    pub sticky: bool,
    pub priority: Priority,
}

impl NotificationContent {
    pub fn reminder(timer: &Timer) -> Self {
        NotificationContent {
            title: Message::ReminderTitle.to_string(),
            body: Message::ReminderBody {
                name: timer.name.clone(),
                duration: timer.duration,
            }
            .to_string(),
            data: NotificationData::for_timer(timer, NotificationKind::Reminder),
            sound: true,
            vibrate: true,
            sticky: false,
            priority: Priority::High,
        }
    }

    /// Silent, low-priority countdown display. Replaced every tick, so it
    /// never plays sound or vibrates.
    pub fn running(timer: &Timer) -> Self {
        NotificationContent {
            title: timer.name.clone(),
            body: Message::RunningBody(format_countdown(timer.remaining_time().unwrap_or(0))).to_string(),
            data: NotificationData::for_timer(timer, NotificationKind::Running),
            sound: false,
            vibrate: false,
            sticky: true,
            priority: Priority::Low,
        }
    }

    pub fn completion(timer: &Timer) -> Self {
        NotificationContent {
            title: Message::CompletionTitle.to_string(),
            body: Message::CompletionBody(timer.name.clone()).to_string(),
            data: NotificationData::for_timer(timer, NotificationKind::Completed),
            sound: true,
            vibrate: true,
            sticky: false,
            priority: Priority::High,
        }
    }
}

/// Identifier of the single live countdown notification of a timer.
pub fn running_identifier(timer_id: &str) -> String {
    format!("{}{}", RUNNING_IDENTIFIER_PREFIX, timer_id)
}

pub fn completion_identifier(timer_id: &str) -> String {
    format!("{}{}", COMPLETED_IDENTIFIER_PREFIX, timer_id)
}

/// A pending notification as reported by the platform.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNotification {
    pub identifier: String,
    pub content: NotificationContent,
    pub fire_at: NaiveDateTime,
}

/// Interactive response buttons attached to reminders.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseAction {
    StartTimer,
    SnoozeTimer,
    StopTimer,
    ClearNotification,
    /// Plain tap on the notification body.
    #[serde(other)]
    Default,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub identifier: String,
    pub action: ResponseAction,
    #[serde(default)]
    pub data: Option<NotificationData>,
}

/// The platform notification subsystem.
///
/// Cancelling or dismissing an unknown identifier is not an error.
pub trait NotificationCenter: Send + Sync {
    /// Asks the platform for permission to alert; `true` when granted.
    fn request_permissions(&self) -> impl Future<Output = Result<bool>> + Send;

    /// Schedules `content` to fire at `fire_at` (local wall-clock time) and
    /// returns the platform identifier.
    fn schedule(&self, content: NotificationContent, fire_at: NaiveDateTime) -> impl Future<Output = Result<String>> + Send;

    /// Every notification still waiting to fire.
    fn scheduled(&self) -> impl Future<Output = Result<Vec<ScheduledNotification>>> + Send;

    fn cancel(&self, identifier: &str) -> impl Future<Output = Result<()>> + Send;

    fn cancel_all(&self) -> impl Future<Output = Result<()>> + Send;

    /// Shows `content` immediately under `identifier`, replacing whatever is
    /// shown under that identifier.
    fn present(&self, identifier: &str, content: NotificationContent) -> impl Future<Output = Result<()>> + Send;

    /// Removes a presented notification.
    fn dismiss(&self, identifier: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Default)]
struct LocalState {
    next_id: u64,
    scheduled: Vec<ScheduledNotification>,
    presented: BTreeMap<String, NotificationContent>,
    history: Vec<NotificationContent>,
}

/// In-process notification center.
pub struct LocalNotificationCenter {
    permission_granted: bool,
    echo: bool,
    state: Mutex<LocalState>,
}

impl LocalNotificationCenter {
    pub fn new(permission_granted: bool) -> Self {
        LocalNotificationCenter {
            permission_granted,
            echo: false,
            state: Mutex::new(LocalState::default()),
        }
    }

    /// Prints alerting (sound-playing) notifications to the console when
    /// they are presented or delivered.
    pub fn with_console_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Removes and returns every scheduled notification due at `now`,
    /// presenting each one.
    pub fn take_due(&self, now: NaiveDateTime) -> Vec<ScheduledNotification> {
        let due = {
            let mut state = self.state.lock();
            let (due, pending): (Vec<_>, Vec<_>) = state.scheduled.drain(..).partition(|n| n.fire_at <= now);
            state.scheduled = pending;
            for notification in &due {
                state.presented.insert(notification.identifier.clone(), notification.content.clone());
                state.history.push(notification.content.clone());
            }
            due
        };
        for notification in &due {
            self.echo(&notification.content);
        }
        due
    }

    /// Notifications currently on screen, keyed by identifier.
    pub fn presented(&self) -> BTreeMap<String, NotificationContent> {
        self.state.lock().presented.clone()
    }

    /// Every notification ever shown, oldest first.
    pub fn history(&self) -> Vec<NotificationContent> {
        self.state.lock().history.clone()
    }

    fn echo(&self, content: &NotificationContent) {
        if self.echo && content.sound {
            msg_info!(Message::NotificationShown {
                title: content.title.clone(),
                body: content.body.clone(),
            });
        }
    }
}

impl Default for LocalNotificationCenter {
    fn default() -> Self {
        LocalNotificationCenter::new(true)
    }
}

impl NotificationCenter for LocalNotificationCenter {
    async fn request_permissions(&self) -> Result<bool> {
        Ok(self.permission_granted)
    }

    async fn schedule(&self, content: NotificationContent, fire_at: NaiveDateTime) -> Result<String> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let identifier = format!("local-{}", state.next_id);
        state.scheduled.push(ScheduledNotification {
            identifier: identifier.clone(),
            content,
            fire_at,
        });
        Ok(identifier)
    }

    async fn scheduled(&self) -> Result<Vec<ScheduledNotification>> {
        Ok(self.state.lock().scheduled.clone())
    }

    async fn cancel(&self, identifier: &str) -> Result<()> {
        self.state.lock().scheduled.retain(|n| n.identifier != identifier);
        Ok(())
    }

    async fn cancel_all(&self) -> Result<()> {
        self.state.lock().scheduled.clear();
        Ok(())
    }

    async fn present(&self, identifier: &str, content: NotificationContent) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.presented.insert(identifier.to_string(), content.clone());
            state.history.push(content.clone());
        }
        self.echo(&content);
        Ok(())
    }

    async fn dismiss(&self, identifier: &str) -> Result<()> {
        self.state.lock().presented.remove(identifier);
        Ok(())
    }
}
