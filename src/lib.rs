//! # Rimmer - Reminder Timers
//!
//! Named reminder timers that fire local notifications at daily trigger
//! times and run a live one-second countdown when started.
//!
//! ## Features
//!
//! - **Recurring Reminders**: daily, weekday, weekend or custom-day schedules
//! - **Live Countdowns**: a running notification updated every second
//! - **Notification Actions**: start, stop, snooze and clear from a reminder
//! - **Persistence**: timers and settings saved as JSON blobs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rimmer::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
