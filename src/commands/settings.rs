use super::open_service;
use crate::libs::messages::Message;
use crate::libs::settings::{Theme, TimeFormat};
use crate::libs::view::View;
use crate::msg_success;
use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Switch {
    On,
    Off,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,
    /// Clock format for trigger times
    #[arg(long, value_enum)]
    time_format: Option<TimeFormat>,
    /// Turn reminder notifications on or off
    #[arg(long, value_enum)]
    notifications: Option<Switch>,
}

/// Applies the given changes, or shows the current settings when none are
/// given.
pub async fn cmd(args: SettingsArgs) -> Result<()> {
    let service = open_service().await;

    if args.theme.is_none() && args.time_format.is_none() && args.notifications.is_none() {
        View::settings(&service.settings());
        return Ok(());
    }

    if let Some(theme) = args.theme {
        let settings = service.set_theme(theme).await;
        msg_success!(Message::ThemeSet(settings.theme.to_string()));
    }
    if let Some(time_format) = args.time_format {
        let settings = service.set_time_format(time_format).await;
        msg_success!(Message::TimeFormatSet(settings.time_format.to_string()));
    }
    match args.notifications {
        Some(Switch::On) => {
            if service.set_notifications_enabled(true).await {
                msg_success!(Message::NotificationsEnabled);
            }
        }
        Some(Switch::Off) => {
            service.set_notifications_enabled(false).await;
            msg_success!(Message::NotificationsDisabled);
        }
        None => {}
    }
    Ok(())
}
