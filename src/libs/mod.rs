//! Core library modules for rimmer.
//!
//! ## Features
//!
//! - **Domain model**: timers, settings, validation
//! - **Time codec**: duration and clock-time conversions
//! - **Scheduling**: recurrence expansion and notification reconciliation
//! - **Countdown**: the one-second tick engine
//! - **State**: the reducer and the orchestrating service
//! - **Infrastructure**: configuration, data storage, messaging, console views
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rimmer::db::blob::MemoryBlobStore;
//! use rimmer::libs::config::EngineConfig;
//! use rimmer::libs::notification::LocalNotificationCenter;
//! use rimmer::libs::service::TimerService;
//! use rimmer::libs::timer::{Frequency, NewTimer};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let service = TimerService::load(Arc::new(MemoryBlobStore::new()), LocalNotificationCenter::default(), EngineConfig::default()).await;
//! let timer = service
//!     .add_timer(NewTimer {
//!         name: "Stretch".to_string(),
//!         duration: 5,
//!         times: vec!["10:30".parse().unwrap()],
//!         frequency: Frequency::Weekdays,
//!         custom_days: None,
//!     })
//!     .await
//!     .unwrap();
//! service.start_timer(&timer.id).await;
//! # }
//! ```

pub mod config;
pub mod countdown;
pub mod data_storage;
pub mod messages;
pub mod notification;
pub mod recurrence;
pub mod scheduler;
pub mod service;
pub mod settings;
pub mod store;
pub mod time;
pub mod timer;
pub mod view;
