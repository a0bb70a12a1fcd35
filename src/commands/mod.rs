pub mod settings;
pub mod timer;
pub mod watch;

use crate::db::blob::FileBlobStore;
use crate::libs::config::{Config, EngineConfig};
use crate::libs::messages::Message;
use crate::libs::notification::LocalNotificationCenter;
use crate::libs::service::TimerService;
use crate::msg_warning;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

/// The service as wired for the console: file-backed storage and the
/// in-process notification center echoing to the terminal.
pub type ConsoleService = TimerService<FileBlobStore, LocalNotificationCenter>;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create, list, edit and run timers")]
    Timer(timer::TimerArgs),
    #[command(about = "Show or change settings")]
    Settings(settings::SettingsArgs),
    #[command(about = "Deliver reminders and run countdowns until interrupted")]
    Watch,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Settings(args) => settings::cmd(args).await,
            Commands::Watch => watch::cmd(None).await,
        }
    }
}

/// Loads the saved state with the configured engine settings. An unreadable
/// config file falls back to defaults.
pub async fn open_service() -> ConsoleService {
    let engine = match Config::read() {
        Ok(config) => config.engine.unwrap_or_default(),
        Err(e) => {
            msg_warning!(Message::ConfigLoadFailed(e.to_string()));
            EngineConfig::default()
        }
    };

    TimerService::load(
        Arc::new(FileBlobStore::new()),
        LocalNotificationCenter::default().with_console_echo(),
        engine,
    )
    .await
}
