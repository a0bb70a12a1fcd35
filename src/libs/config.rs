//! Runtime configuration for rimmer.
//!
//! Configuration lives in `config.json` in the application data directory
//! (see [`DataStorage`]). Every section is optional; a missing file or a
//! missing section means defaults.
//!
//! ```json
//! {
//!   "engine": {
//!     "tick_interval_ms": 1000,
//!     "snooze_minutes": 5
//!   }
//! }
//! ```
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use rimmer::libs::config::Config;
//!
//! let config = Config::read()?;
//! let engine = config.engine.unwrap_or_default();
//! println!("ticking every {} ms", engine.tick_interval_ms);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Countdown and reminder behaviour.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Period of the countdown tick in milliseconds.
    ///
    /// Each tick removes one second from every running timer, so values other
    /// than 1000 make countdowns run fast or slow. Kept configurable for
    /// demos and slow devices.
    pub tick_interval_ms: u64,

    /// Minutes a reminder is pushed back by the snooze response.
    pub snooze_minutes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tick_interval_ms: 1000,
            snooze_minutes: 5,
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,
}

impl Config {
    /// Reads the configuration from the default data directory.
    ///
    /// A missing file yields the default configuration; a corrupted file is
    /// an error.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    /// Writes pretty-printed JSON, replacing any existing file.
    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }
}
