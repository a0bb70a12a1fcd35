#[derive(Debug, Clone)]
pub enum Message {
    // === TIMER MESSAGES ===
    TimerCreated(String), // name
    TimerUpdated(String), // name
    TimerDeleted(String), // name
    TimerNotFound(String), // id
    TimerEnabled(String),
    TimerDisabled(String),
    TimerStarted(String),
    TimerStopped(String),
    TimerCompleted(String),
    TimersEmpty,
    TimerInvalid(String), // validation summary

    // === NOTIFICATION CONTENT ===
    ReminderTitle,
    ReminderBody {
        name: String,
        duration: u32,
    },
    RunningBody(String), // formatted remaining time
    CompletionTitle,
    CompletionBody(String), // name
    NotificationShown {
        title: String,
        body: String,
    },

    // === NOTIFICATION MESSAGES ===
    NotificationsScheduled {
        name: String,
        count: usize,
    },
    NotificationsCancelled {
        timer_id: String,
        count: usize,
    },
    NotificationScheduleFailed(String),
    NotificationCancelFailed(String),
    RunningNotificationFailed(String),
    CompletionNotificationFailed(String),
    NotificationPermissionCheckFailed(String),
    NotificationsPermissionDenied,
    NotificationsEnabled,
    NotificationsDisabled,
    NotificationResponseMissingData(String), // identifier
    TimerSnoozed {
        name: String,
        minutes: u32,
    },

    // === PERSISTENCE MESSAGES ===
    TimersLoadFailed(String),
    TimersSaveFailed(String),
    SettingsLoadFailed(String),
    SettingsSaveFailed(String),

    // === SETTINGS MESSAGES ===
    ThemeSet(String),
    TimeFormatSet(String),

    // === CONFIGURATION MESSAGES ===
    ConfigLoadFailed(String),

    // === TICK ENGINE MESSAGES ===
    TickEngineStarted(u64), // period in ms
    TickEngineStopped,
    TickEngineTaskFailed(String),
    Tick {
        running: usize,
        completed: usize,
    },

    // === WATCHER MESSAGES ===
    WatcherStarted(usize), // timer count
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherShuttingDown,
}
