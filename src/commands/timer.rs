use super::{open_service, watch};
use crate::libs::messages::Message;
use crate::libs::time::{convert_to_24_hour, TimeError, TimeOfDay};
use crate::libs::timer::{Frequency, NewTimer};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeSet;

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    command: Option<TimerCommand>,
}

#[derive(Debug, Subcommand)]
enum TimerCommand {
    /// List all timers
    List,
    /// Create a new timer
    Add {
        /// Timer name
        name: String,
        /// Countdown length in minutes
        #[arg(short, long)]
        duration: u32,
        /// Trigger time, `HH:MM` or `h:MM AM|PM` (repeatable)
        #[arg(short, long = "time", value_parser = parse_time)]
        times: Vec<TimeOfDay>,
        /// Repeat frequency
        #[arg(short, long, value_enum, default_value_t = Frequency::Daily)]
        frequency: Frequency,
        /// Days for the custom frequency, 0 = Sunday (comma separated)
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
    },
    /// Edit a timer
    Edit {
        /// Timer ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New countdown length in minutes
        #[arg(short, long)]
        duration: Option<u32>,
        /// Replacement trigger times (repeatable)
        #[arg(short, long = "time", value_parser = parse_time)]
        times: Vec<TimeOfDay>,
        /// New repeat frequency
        #[arg(short, long, value_enum)]
        frequency: Option<Frequency>,
        /// Replacement custom days (comma separated)
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
    },
    /// Delete a timer
    Delete {
        /// Timer ID
        id: String,
    },
    /// Enable or disable a timer's reminders
    Toggle {
        /// Timer ID
        id: String,
    },
    /// Run a countdown in the foreground until it completes
    Start {
        /// Timer ID
        id: String,
    },
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    match args.command.unwrap_or(TimerCommand::List) {
        TimerCommand::List => handle_list().await,
        TimerCommand::Add {
            name,
            duration,
            times,
            frequency,
            days,
        } => {
            handle_add(NewTimer {
                name,
                duration,
                times,
                frequency,
                custom_days: day_set(days),
            })
            .await
        }
        TimerCommand::Edit {
            id,
            name,
            duration,
            times,
            frequency,
            days,
        } => handle_edit(id, name, duration, times, frequency, day_set(days)).await,
        TimerCommand::Delete { id } => handle_delete(id).await,
        TimerCommand::Toggle { id } => handle_toggle(id).await,
        TimerCommand::Start { id } => watch::cmd(Some(id)).await,
    }
}

async fn handle_list() -> Result<()> {
    let service = open_service().await;
    let timers = service.timers();

    if timers.is_empty() {
        msg_info!(Message::TimersEmpty);
        return Ok(());
    }

    View::timers(&timers, service.settings().time_format);
    Ok(())
}

async fn handle_add(draft: NewTimer) -> Result<()> {
    let service = open_service().await;

    match service.add_timer(draft).await {
        Ok(timer) => msg_success!(Message::TimerCreated(timer.name)),
        Err(errors) => msg_error!(Message::TimerInvalid(errors.to_string())),
    }
    Ok(())
}

async fn handle_edit(
    id: String,
    name: Option<String>,
    duration: Option<u32>,
    times: Vec<TimeOfDay>,
    frequency: Option<Frequency>,
    custom_days: Option<BTreeSet<u8>>,
) -> Result<()> {
    let service = open_service().await;

    let Some(timer) = service.timer(&id) else {
        msg_error!(Message::TimerNotFound(id));
        return Ok(());
    };

    let mut draft = timer.draft();
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(duration) = duration {
        draft.duration = duration;
    }
    if !times.is_empty() {
        draft.times = times;
    }
    if let Some(frequency) = frequency {
        draft.frequency = frequency;
    }
    if custom_days.is_some() {
        draft.custom_days = custom_days;
    }

    match service.update_timer(&id, draft).await {
        Ok(Some(timer)) => msg_success!(Message::TimerUpdated(timer.name)),
        Ok(None) => msg_error!(Message::TimerNotFound(id)),
        Err(errors) => msg_error!(Message::TimerInvalid(errors.to_string())),
    }
    Ok(())
}

async fn handle_delete(id: String) -> Result<()> {
    let service = open_service().await;

    let Some(timer) = service.timer(&id) else {
        msg_error!(Message::TimerNotFound(id));
        return Ok(());
    };

    if service.delete_timer(&id).await {
        msg_success!(Message::TimerDeleted(timer.name));
    }
    Ok(())
}

async fn handle_toggle(id: String) -> Result<()> {
    let service = open_service().await;

    match service.toggle_timer(&id).await {
        Some(timer) if timer.enabled => msg_success!(Message::TimerEnabled(timer.name)),
        Some(timer) => msg_success!(Message::TimerDisabled(timer.name)),
        None => msg_error!(Message::TimerNotFound(id)),
    }
    Ok(())
}

/// Accepts both 24-hour and 12-hour input.
fn parse_time(value: &str) -> Result<TimeOfDay, TimeError> {
    value.parse::<TimeOfDay>().or_else(|_| convert_to_24_hour(value)?.parse::<TimeOfDay>())
}

fn day_set(days: Vec<u8>) -> Option<BTreeSet<u8>> {
    if days.is_empty() {
        None
    } else {
        Some(days.into_iter().collect())
    }
}
