#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rimmer::db::blob::{BlobStore, FileBlobStore};
    use rimmer::db::settings::SettingsRepository;
    use rimmer::db::timers::TimerRepository;
    use rimmer::libs::data_storage::DataStorage;
    use rimmer::libs::settings::{AppSettings, Theme};
    use rimmer::libs::store::{reduce, Action, AppState};
    use rimmer::libs::timer::{Frequency, NewTimer, Timer};
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct StorageTestContext {
        temp_dir: TempDir,
        store: Arc<FileBlobStore>,
    }

    impl AsyncTestContext for StorageTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = Arc::new(FileBlobStore::with_storage(DataStorage::with_base(temp_dir.path().join("rimmer"))));
            StorageTestContext { temp_dir, store }
        }
    }

    fn custom_timer() -> Timer {
        Timer::new(
            "1700000000000",
            NewTimer {
                name: "Gym".to_string(),
                duration: 45,
                times: vec!["06:30".parse().unwrap(), "18:00".parse().unwrap()],
                frequency: Frequency::Custom,
                custom_days: Some([1, 3, 5].into_iter().collect()),
            },
            Utc::now(),
        )
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_blob_round_trip(ctx: &mut StorageTestContext) {
        assert_eq!(ctx.store.get("timers").await.unwrap(), None);

        ctx.store.set("timers", "[]".to_string()).await.unwrap();
        assert_eq!(ctx.store.get("timers").await.unwrap().as_deref(), Some("[]"));
        assert!(ctx.temp_dir.path().join("rimmer").join("timers.json").exists());
        assert!(!ctx.temp_dir.path().join("rimmer").join("timers.json.tmp").exists());

        ctx.store.set("timers", "[1]".to_string()).await.unwrap();
        assert_eq!(ctx.store.get("timers").await.unwrap().as_deref(), Some("[1]"));

        ctx.store.remove("timers").await.unwrap();
        assert_eq!(ctx.store.get("timers").await.unwrap(), None);
        ctx.store.remove("timers").await.unwrap();
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_timer_list_round_trip(ctx: &mut StorageTestContext) {
        let repository = TimerRepository::new(ctx.store.clone());
        assert!(repository.load().await.unwrap().is_empty());

        let timers = vec![custom_timer()];
        repository.save(&timers).await.unwrap();
        assert_eq!(repository.load().await.unwrap(), timers);
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_running_state_is_not_persisted(ctx: &mut StorageTestContext) {
        let state = reduce(AppState::default(), Action::Add(custom_timer()));
        let state = reduce(
            state,
            Action::Start {
                id: "1700000000000".to_string(),
                at: Utc::now(),
            },
        );
        assert!(state.timers[0].is_running());

        let repository = TimerRepository::new(ctx.store.clone());
        repository.save(&state.timers).await.unwrap();

        let blob = ctx.store.get("timers").await.unwrap().unwrap();
        assert!(!blob.contains("remainingTime"));
        let loaded = repository.load().await.unwrap();
        assert!(!loaded[0].is_running());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_timer_blob_uses_camel_case(ctx: &mut StorageTestContext) {
        TimerRepository::new(ctx.store.clone()).save(&[custom_timer()]).await.unwrap();
        let blob = ctx.store.get("timers").await.unwrap().unwrap();

        for key in ["\"customDays\":[1,3,5]", "\"createdAt\"", "\"updatedAt\"", "\"frequency\":\"custom\"", "\"times\":[\"06:30\",\"18:00\"]"] {
            assert!(blob.contains(key), "missing {} in {}", key, blob);
        }
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_unknown_fields_are_ignored(ctx: &mut StorageTestContext) {
        let blob = r#"[{"id":"1","name":"Old","duration":5,"times":["09:00"],"frequency":"daily","enabled":true,
            "remainingTime":42,"legacy":"x","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#;
        ctx.store.set("timers", blob.to_string()).await.unwrap();

        let loaded = TimerRepository::new(ctx.store.clone()).load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].custom_days, None);
        assert!(!loaded[0].is_running());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_corrupted_blob_is_an_error(ctx: &mut StorageTestContext) {
        ctx.store.set("timers", "{not json".to_string()).await.unwrap();
        assert!(TimerRepository::new(ctx.store.clone()).load().await.is_err());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_settings_default_and_round_trip(ctx: &mut StorageTestContext) {
        let repository = SettingsRepository::new(ctx.store.clone());
        assert_eq!(repository.load().await.unwrap(), AppSettings::default());

        let settings = AppSettings {
            theme: Theme::Light,
            ..AppSettings::default()
        };
        repository.save(&settings).await.unwrap();
        assert_eq!(repository.load().await.unwrap(), settings);

        ctx.store.set("settings", r#"{"theme":"dark"}"#.to_string()).await.unwrap();
        let partial = repository.load().await.unwrap();
        assert_eq!(partial.theme, Theme::Dark);
        assert!(!partial.notifications_enabled);
    }
}
