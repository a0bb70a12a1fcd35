//! Display implementation for rimmer messages.
//!
//! All user-facing text, including notification titles and bodies, is
//! defined here so wording stays consistent between the console host and
//! the notifications it produces.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TIMER MESSAGES ===
            Message::TimerCreated(name) => format!("Timer '{}' created", name),
            Message::TimerUpdated(name) => format!("Timer '{}' updated", name),
            Message::TimerDeleted(name) => format!("Timer '{}' deleted", name),
            Message::TimerNotFound(id) => format!("Timer with ID {} not found", id),
            Message::TimerEnabled(name) => format!("Timer '{}' enabled", name),
            Message::TimerDisabled(name) => format!("Timer '{}' disabled", name),
            Message::TimerStarted(name) => format!("Timer '{}' started", name),
            Message::TimerStopped(name) => format!("Timer '{}' stopped", name),
            Message::TimerCompleted(name) => format!("Timer '{}' completed", name),
            Message::TimersEmpty => "No timers yet. Create one with 'rimmer timer add'.".to_string(),
            Message::TimerInvalid(summary) => format!("Timer is invalid: {}", summary),

            // === NOTIFICATION CONTENT ===
            Message::ReminderTitle => "Timer Reminder".to_string(),
            Message::ReminderBody { name, duration } => format!("Time for {} ({} minutes)", name, duration),
            Message::RunningBody(remaining) => format!("{} remaining", remaining),
            Message::CompletionTitle => "Timer Complete".to_string(),
            Message::CompletionBody(name) => format!("{} has finished", name),
            Message::NotificationShown { title, body } => format!("🔔 {}: {}", title, body),

            // === NOTIFICATION MESSAGES ===
            Message::NotificationsScheduled { name, count } => format!("Scheduled {} notification(s) for '{}'", count, name),
            Message::NotificationsCancelled { timer_id, count } => format!("Cancelled {} notification(s) for timer {}", count, timer_id),
            Message::NotificationScheduleFailed(e) => format!("Failed to schedule notifications: {}", e),
            Message::NotificationCancelFailed(e) => format!("Failed to cancel notifications: {}", e),
            Message::RunningNotificationFailed(e) => format!("Failed to update the running timer notification: {}", e),
            Message::CompletionNotificationFailed(e) => format!("Failed to show the completion notification: {}", e),
            Message::NotificationPermissionCheckFailed(e) => format!("Failed to check notification permissions: {}", e),
            Message::NotificationsPermissionDenied => "Notification permissions not granted. Enable notifications in your device settings to use timers.".to_string(),
            Message::NotificationsEnabled => "Notifications enabled".to_string(),
            Message::NotificationsDisabled => "Notifications disabled".to_string(),
            Message::NotificationResponseMissingData(identifier) => format!("Notification {} carries no timer data", identifier),
            Message::TimerSnoozed { name, minutes } => format!("'{}' snoozed for {} minutes", name, minutes),

            // === PERSISTENCE MESSAGES ===
            Message::TimersLoadFailed(e) => format!("Error loading timers: {}", e),
            Message::TimersSaveFailed(e) => format!("Error saving timers: {}", e),
            Message::SettingsLoadFailed(e) => format!("Error loading settings: {}", e),
            Message::SettingsSaveFailed(e) => format!("Error saving settings: {}", e),

            // === SETTINGS MESSAGES ===
            Message::ThemeSet(theme) => format!("Theme set to {}", theme),
            Message::TimeFormatSet(format) => format!("Time format set to {}", format),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigLoadFailed(e) => format!("Failed to read configuration, using defaults: {}", e),

            // === TICK ENGINE MESSAGES ===
            Message::TickEngineStarted(period) => format!("Tick engine started ({} ms period)", period),
            Message::TickEngineStopped => "Tick engine stopped".to_string(),
            Message::TickEngineTaskFailed(e) => format!("Tick engine task failed: {}", e),
            Message::Tick { running, completed } => format!("Tick: {} running, {} completed", running, completed),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted(count) => format!("Watching {} timer(s). Press Ctrl-C to stop.", count),
            Message::WatcherReceivedCtrlC => "Received Ctrl-C, shutting down".to_string(),
            Message::WatcherCtrlCListenFailed(e) => format!("Failed to listen for Ctrl-C: {}", e),
            Message::WatcherShuttingDown => "Watcher shutting down".to_string(),
        };
        write!(f, "{}", text)
    }
}
