#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rimmer::db::blob::MemoryBlobStore;
    use rimmer::libs::config::EngineConfig;
    use rimmer::libs::countdown::{advance, step, Step, TickEngine};
    use rimmer::libs::notification::{completion_identifier, running_identifier, LocalNotificationCenter};
    use rimmer::libs::service::{TimerEvent, TimerService};
    use rimmer::libs::store::{reduce, Action, AppState};
    use rimmer::libs::timer::{Frequency, NewTimer, Timer};
    use std::sync::Arc;
    use test_context::{test_context, AsyncTestContext};
    use tokio::time::Duration;

    fn one_minute() -> NewTimer {
        NewTimer {
            name: "Plank".to_string(),
            duration: 1,
            times: vec!["07:00".parse().unwrap()],
            frequency: Frequency::Daily,
            custom_days: None,
        }
    }

    fn started_timers(ids: &[&str]) -> Vec<Timer> {
        let at = Utc::now();
        let mut state = AppState::default();
        for id in ids {
            state = reduce(state, Action::Add(Timer::new(*id, one_minute(), at)));
            state = reduce(state, Action::Start { id: id.to_string(), at });
        }
        state.timers
    }

    struct CountdownTestContext {
        service: Arc<TimerService<MemoryBlobStore, LocalNotificationCenter>>,
    }

    impl AsyncTestContext for CountdownTestContext {
        async fn setup() -> Self {
            let service = TimerService::load(Arc::new(MemoryBlobStore::new()), LocalNotificationCenter::new(true), EngineConfig::default()).await;
            CountdownTestContext {
                service: Arc::new(service),
            }
        }
    }

    #[test]
    fn test_step_ignores_stopped_timer() {
        let mut timer = Timer::new("1", one_minute(), Utc::now());
        assert_eq!(step(&mut timer, Utc::now()), Step::Idle);
        assert_eq!(timer.remaining_time(), None);
    }

    #[test]
    fn test_sixty_steps_complete_a_one_minute_timer() {
        let mut timers = started_timers(&["1"]);
        let mut completions = 0;

        for tick in 1..=60 {
            let outcome = advance(&mut timers, Utc::now());
            completions += outcome.completed.len();
            if tick < 60 {
                assert_eq!(timers[0].remaining_time(), Some(60 - tick));
                assert_eq!(outcome.running.len(), 1);
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(timers[0].remaining_time(), None);
        assert!(advance(&mut timers, Utc::now()).is_empty());
    }

    #[test]
    fn test_advance_moves_every_running_timer_together() {
        let mut timers = started_timers(&["1", "2"]);
        timers.push(Timer::new("3", one_minute(), Utc::now()));

        let outcome = advance(&mut timers, Utc::now());
        assert_eq!(outcome.running.len(), 2);
        assert!(outcome.running.iter().all(|timer| timer.remaining_time() == Some(59)));
        assert_eq!(timers[2].remaining_time(), None);
    }

    #[test_context(CountdownTestContext)]
    #[tokio::test]
    async fn test_service_tick_completes_once(ctx: &mut CountdownTestContext) {
        let service = &ctx.service;
        let timer = service.add_timer(one_minute()).await.unwrap();
        let mut events = service.subscribe();

        service.start_timer(&timer.id).await.unwrap();
        assert_eq!(events.try_recv().unwrap(), TimerEvent::Started(service.timer(&timer.id).unwrap()));
        assert!(service.scheduler().center().presented().contains_key(&running_identifier(&timer.id)));

        let mut completed = 0;
        for _ in 0..60 {
            completed += service.tick(Utc::now()).await.completed.len();
        }
        assert_eq!(completed, 1);
        assert!(service.tick(Utc::now()).await.is_empty());

        let finished = service.timer(&timer.id).unwrap();
        assert!(!finished.is_running());
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Completed(t)) if t.id == timer.id));
        assert!(events.try_recv().is_err());

        let center = service.scheduler().center();
        let presented = center.presented();
        assert!(presented.contains_key(&completion_identifier(&timer.id)));
        assert!(!presented.contains_key(&running_identifier(&timer.id)));

        let completions: Vec<_> = center.history().into_iter().filter(|content| content.title == "Timer Complete").collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].body, "Plank has finished");
    }

    #[test_context(CountdownTestContext)]
    #[tokio::test]
    async fn test_running_notification_shows_remaining_time(ctx: &mut CountdownTestContext) {
        let service = &ctx.service;
        let timer = service.add_timer(one_minute()).await.unwrap();
        service.start_timer(&timer.id).await.unwrap();

        let presented = service.scheduler().center().presented();
        let running = &presented[&running_identifier(&timer.id)];
        assert_eq!(running.title, "Plank");
        assert_eq!(running.body, "01:00 remaining");
        assert!(!running.sound);

        service.tick(Utc::now()).await;
        let presented = service.scheduler().center().presented();
        assert_eq!(presented[&running_identifier(&timer.id)].body, "00:59 remaining");
        assert_eq!(presented.keys().filter(|key| key.starts_with("running-timer-")).count(), 1);
    }

    #[test_context(CountdownTestContext)]
    #[tokio::test]
    async fn test_stop_cancels_without_completion(ctx: &mut CountdownTestContext) {
        let service = &ctx.service;
        let timer = service.add_timer(one_minute()).await.unwrap();
        let mut events = service.subscribe();

        service.start_timer(&timer.id).await.unwrap();
        service.tick(Utc::now()).await;
        let stopped = service.stop_timer(&timer.id).await.unwrap();

        assert!(!stopped.is_running());
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Started(_))));
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Stopped(_))));
        assert!(!service.scheduler().center().presented().contains_key(&running_identifier(&timer.id)));
        assert!(service.tick(Utc::now()).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_runs_countdown_to_completion() {
        let service = Arc::new(TimerService::load(Arc::new(MemoryBlobStore::new()), LocalNotificationCenter::new(true), EngineConfig::default()).await);
        let timer = service.add_timer(one_minute()).await.unwrap();
        let mut events = service.subscribe();

        let engine = TickEngine::spawn(service.clone(), Duration::from_secs(1));
        service.start_timer(&timer.id).await.unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(service.timer(&timer.id).unwrap().is_running());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(!service.timer(&timer.id).unwrap().is_running());

        engine.stop().await;

        assert!(matches!(events.try_recv(), Ok(TimerEvent::Started(_))));
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Completed(_))));
        assert!(events.try_recv().is_err());
    }
}
