use super::blob::BlobStore;
use crate::libs::settings::AppSettings;
use anyhow::Result;
use std::sync::Arc;

pub const SETTINGS_KEY: &str = "settings";

pub struct SettingsRepository<S> {
    store: Arc<S>,
}

impl<S: BlobStore> SettingsRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        SettingsRepository { store }
    }

    /// Loads saved settings, falling back to defaults when none exist.
    pub async fn load(&self) -> Result<AppSettings> {
        match self.store.get(SETTINGS_KEY).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(AppSettings::default()),
        }
    }

    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        let blob = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, blob).await
    }
}
