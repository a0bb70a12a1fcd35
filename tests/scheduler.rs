#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
    use rimmer::libs::notification::{running_identifier, LocalNotificationCenter, NotificationCenter, NotificationContent, NotificationKind};
    use rimmer::libs::scheduler::NotificationScheduler;
    use rimmer::libs::store::{reduce, Action, AppState};
    use rimmer::libs::timer::{Frequency, NewTimer, Timer};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(7, 0, 0).unwrap()
    }

    fn timer(id: &str, frequency: Frequency) -> Timer {
        Timer::new(
            id,
            NewTimer {
                name: "Stretch".to_string(),
                duration: 5,
                times: vec!["08:00".parse().unwrap()],
                frequency,
                custom_days: None,
            },
            Utc::now(),
        )
    }

    fn scheduler() -> NotificationScheduler<LocalNotificationCenter> {
        NotificationScheduler::new(LocalNotificationCenter::new(true))
    }

    async fn tagged(scheduler: &NotificationScheduler<LocalNotificationCenter>, timer_id: &str) -> usize {
        scheduler
            .scheduled_notifications()
            .await
            .unwrap()
            .iter()
            .filter(|notification| notification.content.data.timer_id == timer_id)
            .count()
    }

    #[tokio::test]
    async fn test_schedules_tagged_reminders() {
        let scheduler = scheduler();
        let timer = timer("1", Frequency::Weekdays);

        assert_eq!(scheduler.schedule_timer_notifications(&timer, now()).await.unwrap(), 5);

        let scheduled = scheduler.scheduled_notifications().await.unwrap();
        assert_eq!(scheduled.len(), 5);
        for notification in &scheduled {
            assert_eq!(notification.content.data.timer_id, "1");
            assert_eq!(notification.content.data.action, Some(NotificationKind::Reminder));
            assert_eq!(notification.content.title, "Timer Reminder");
            assert_eq!(notification.content.body, "Time for Stretch (5 minutes)");
            assert!(notification.fire_at > now());
        }
    }

    #[tokio::test]
    async fn test_rescheduling_replaces_previous_reminders() {
        let scheduler = scheduler();
        let timer = timer("1", Frequency::Weekdays);

        scheduler.schedule_timer_notifications(&timer, now()).await.unwrap();
        scheduler.schedule_timer_notifications(&timer, now()).await.unwrap();

        assert_eq!(tagged(&scheduler, "1").await, 5);
    }

    #[tokio::test]
    async fn test_disabled_timer_gets_no_reminders() {
        let scheduler = scheduler();
        let mut timer = timer("1", Frequency::Daily);
        timer.enabled = false;

        assert_eq!(scheduler.schedule_timer_notifications(&timer, now()).await.unwrap(), 0);
        assert_eq!(tagged(&scheduler, "1").await, 0);
    }

    #[tokio::test]
    async fn test_cancel_is_scoped_and_idempotent() {
        let scheduler = scheduler();
        scheduler.schedule_timer_notifications(&timer("1", Frequency::Weekends), now()).await.unwrap();
        scheduler.schedule_timer_notifications(&timer("2", Frequency::Daily), now()).await.unwrap();

        assert_eq!(scheduler.cancel_timer_notifications("1").await.unwrap(), 2);
        assert_eq!(scheduler.cancel_timer_notifications("1").await.unwrap(), 0);
        assert_eq!(scheduler.cancel_timer_notifications("unknown").await.unwrap(), 0);

        assert_eq!(tagged(&scheduler, "1").await, 0);
        assert_eq!(tagged(&scheduler, "2").await, 1);
    }

    #[tokio::test]
    async fn test_cancel_finds_reminders_from_an_earlier_run() {
        let center = LocalNotificationCenter::new(true);
        let previous = timer("1", Frequency::Daily);
        center.schedule(NotificationContent::reminder(&previous), now() + Duration::hours(1)).await.unwrap();
        center.schedule(NotificationContent::reminder(&previous), now() + Duration::hours(25)).await.unwrap();

        let scheduler = NotificationScheduler::new(center);
        assert_eq!(scheduler.cancel_timer_notifications("1").await.unwrap(), 2);
        assert!(scheduler.scheduled_notifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snooze_adds_one_cancellable_reminder() {
        let scheduler = scheduler();
        let timer = timer("1", Frequency::Daily);
        scheduler.schedule_timer_notifications(&timer, now()).await.unwrap();

        let identifier = scheduler.snooze(&timer, now(), 5).await.unwrap();
        let scheduled = scheduler.scheduled_notifications().await.unwrap();
        let snoozed = scheduled.iter().find(|notification| notification.identifier == identifier).unwrap();
        assert_eq!(snoozed.fire_at, now() + Duration::minutes(5));
        assert_eq!(tagged(&scheduler, "1").await, 2);

        assert_eq!(scheduler.cancel_timer_notifications("1").await.unwrap(), 2);
        assert_eq!(tagged(&scheduler, "1").await, 0);
    }

    #[tokio::test]
    async fn test_cancel_all_clears_every_timer() {
        let scheduler = scheduler();
        scheduler.schedule_timer_notifications(&timer("1", Frequency::Daily), now()).await.unwrap();
        scheduler.schedule_timer_notifications(&timer("2", Frequency::Weekdays), now()).await.unwrap();

        scheduler.cancel_all_notifications().await.unwrap();
        assert!(scheduler.scheduled_notifications().await.unwrap().is_empty());
        assert_eq!(scheduler.cancel_timer_notifications("2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_running_notification_is_replaced_not_stacked() {
        let scheduler = scheduler();
        let state = reduce(AppState::default(), Action::Add(timer("1", Frequency::Daily)));
        let state = reduce(state, Action::Start { id: "1".to_string(), at: Utc::now() });
        let running = state.timer("1").unwrap();

        scheduler.show_running_timer_notification(running).await.unwrap();
        scheduler.update_running_timer_notification(running).await.unwrap();
        scheduler.update_running_timer_notification(running).await.unwrap();

        let presented = scheduler.center().presented();
        assert_eq!(presented.len(), 1);
        let content = &presented[&running_identifier("1")];
        assert_eq!(content.body, "05:00 remaining");
        assert!(!content.sound && !content.vibrate);

        scheduler.cancel_running_timer_notification("1").await.unwrap();
        assert!(scheduler.center().presented().is_empty());
        assert!(scheduler.scheduled_notifications().await.unwrap().is_empty());
    }
}
