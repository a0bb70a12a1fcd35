//! Persistence layer for rimmer.
//!
//! State is stored as JSON blobs in a key-value store: the timer list under
//! `timers` and the user settings under `settings`. There is no schema
//! version; unknown fields are ignored on load and the countdown state of a
//! timer is never written.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rimmer::db::{blob::FileBlobStore, timers::TimerRepository};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(FileBlobStore::new());
//! let timers = TimerRepository::new(store).load().await?;
//! println!("{} timers saved", timers.len());
//! # Ok(())
//! # }
//! ```

/// Key-value blob store seam with file and memory implementations.
pub mod blob;

/// The `settings` blob.
pub mod settings;

/// The `timers` blob.
pub mod timers;
