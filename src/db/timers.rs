use super::blob::BlobStore;
use crate::libs::timer::Timer;
use anyhow::Result;
use std::sync::Arc;

pub const TIMERS_KEY: &str = "timers";

/// The timer list, stored as one JSON array under [`TIMERS_KEY`].
pub struct TimerRepository<S> {
    store: Arc<S>,
}

impl<S: BlobStore> TimerRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        TimerRepository { store }
    }

    /// Loads the saved list; a missing blob is an empty list.
    pub async fn load(&self) -> Result<Vec<Timer>> {
        match self.store.get(TIMERS_KEY).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save(&self, timers: &[Timer]) -> Result<()> {
        let blob = serde_json::to_string(timers)?;
        self.store.set(TIMERS_KEY, blob).await
    }
}
