//! Duration and clock-time conversions.
//!
//! Timers carry their length as a flat minute count and their trigger times as
//! 24-hour `HH:MM` strings. This module converts between those stored forms and
//! the structured or display forms used everywhere else:
//!
//! - **Durations**: minutes ⇄ [`TimerDuration`] (hours/minutes/seconds/ms)
//! - **Clock times**: [`TimeOfDay`] parsing, 12h/24h display, 12h ⇄ 24h strings
//! - **Countdowns**: remaining seconds → `MM:SS` / `H:MM:SS`
//! - **Frequencies**: human-readable repeat descriptions
//!
//! ## Examples
//!
//! ```rust
//! use rimmer::libs::settings::TimeFormat;
//! use rimmer::libs::time::{convert_to_24_hour, format_time, minutes_to_duration, TimeOfDay};
//!
//! let duration = minutes_to_duration(90.0);
//! assert_eq!((duration.hours, duration.minutes), (1, 30));
//!
//! let time: TimeOfDay = "13:05".parse().unwrap();
//! assert_eq!(format_time(&time, TimeFormat::TwelveHour), "1:05 PM");
//! assert_eq!(convert_to_24_hour("1:05 PM").unwrap(), "13:05");
//! ```

use crate::libs::settings::TimeFormat;
use crate::libs::timer::Frequency;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// A day of the week as used by custom frequencies (0 = Sunday … 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfWeek {
    pub value: u8,
    pub label: &'static str,
    pub short: &'static str,
}

pub const DAYS_OF_WEEK: [DayOfWeek; 7] = [
    DayOfWeek { value: 0, label: "Sunday", short: "Sun" },
    DayOfWeek { value: 1, label: "Monday", short: "Mon" },
    DayOfWeek { value: 2, label: "Tuesday", short: "Tue" },
    DayOfWeek { value: 3, label: "Wednesday", short: "Wed" },
    DayOfWeek { value: 4, label: "Thursday", short: "Thu" },
    DayOfWeek { value: 5, label: "Friday", short: "Fri" },
    DayOfWeek { value: 6, label: "Saturday", short: "Sat" },
];

/// Errors produced while parsing clock-time strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidFormat(String),
    #[error("Hour {0} is out of range")]
    HourOutOfRange(u32),
    #[error("Minute {0} is out of range")]
    MinuteOutOfRange(u32),
    #[error("Invalid meridiem '{0}', expected AM or PM")]
    InvalidMeridiem(String),
}

/// A duration split into display components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

/// A wall-clock trigger time, stored and serialized as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(TimeOfDay)
            .ok_or_else(|| TimeError::InvalidFormat(format!("{}:{}", hour, minute)))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = parse_clock(s.trim())?;
        TimeOfDay::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

fn parse_clock(s: &str) -> Result<(u32, u32), TimeError> {
    let invalid = || TimeError::InvalidFormat(s.to_string());
    let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours = hours.parse::<u32>().map_err(|_| invalid())?;
    let minutes = minutes.parse::<u32>().map_err(|_| invalid())?;
    Ok((hours, minutes))
}

/// Splits a minute count into hours, minutes, seconds and milliseconds.
///
/// Integer inputs convert exactly; a fractional remainder lands in the
/// seconds and milliseconds fields. Negative inputs clamp to zero.
pub fn minutes_to_duration(minutes: f64) -> TimerDuration {
    let total_ms = (minutes * MS_PER_MINUTE as f64).round().max(0.0) as u64;
    let hours = total_ms / MS_PER_HOUR;
    let remaining = total_ms % MS_PER_HOUR;
    let mins = remaining / MS_PER_MINUTE;
    let remaining = remaining % MS_PER_MINUTE;

    TimerDuration {
        hours: hours as u32,
        minutes: mins as u32,
        seconds: (remaining / MS_PER_SECOND) as u32,
        milliseconds: (remaining % MS_PER_SECOND) as u32,
    }
}

/// Inverse of [`minutes_to_duration`].
pub fn duration_to_minutes(duration: &TimerDuration) -> f64 {
    duration.hours as f64 * 60.0 + duration.minutes as f64 + duration.seconds as f64 / 60.0 + duration.milliseconds as f64 / MS_PER_MINUTE as f64
}

/// Formats a duration as `HH:MM:SS:ZZ` where `ZZ` is centiseconds.
pub fn format_duration(duration: &TimerDuration) -> String {
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        duration.hours,
        duration.minutes,
        duration.seconds,
        duration.milliseconds / 10
    )
}

/// Parses `HH:MM:SS:ZZ`. Missing or malformed fields read as zero.
pub fn parse_duration(value: &str) -> TimerDuration {
    let parts: Vec<u32> = value.split(':').map(|part| part.trim().parse().unwrap_or(0)).collect();
    let part = |index: usize| parts.get(index).copied().unwrap_or(0);

    TimerDuration {
        hours: part(0),
        minutes: part(1),
        seconds: part(2),
        milliseconds: part(3) * 10,
    }
}

/// Renders a trigger time in the user's preferred clock format.
pub fn format_time(time: &TimeOfDay, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => time.to_string(),
        TimeFormat::TwelveHour => twelve_hour(time.hour(), time.minute()),
    }
}

fn twelve_hour(hour: u32, minute: u32) -> String {
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", hour12, minute, meridiem)
}

/// Converts a 24-hour `HH:MM` string to `h:MM AM|PM`.
pub fn convert_to_12_hour(time24h: &str) -> Result<String, TimeError> {
    let time: TimeOfDay = time24h.parse()?;
    Ok(twelve_hour(time.hour(), time.minute()))
}

/// Converts `h:MM AM|PM` back to a zero-padded 24-hour `HH:MM` string.
pub fn convert_to_24_hour(time12h: &str) -> Result<String, TimeError> {
    let trimmed = time12h.trim();
    let (clock, meridiem) = trimmed
        .split_once(' ')
        .ok_or_else(|| TimeError::InvalidFormat(trimmed.to_string()))?;
    let (hours, minutes) = parse_clock(clock)?;
    if !(1..=12).contains(&hours) {
        return Err(TimeError::HourOutOfRange(hours));
    }

    let hour24 = match (meridiem.trim().to_ascii_uppercase().as_str(), hours) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        ("PM", h) => h + 12,
        (other, _) => return Err(TimeError::InvalidMeridiem(other.to_string())),
    };

    Ok(TimeOfDay::new(hour24, minutes)?.to_string())
}

/// Formats remaining countdown seconds as `MM:SS`, or `H:MM:SS` past an hour.
pub fn format_countdown(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

pub fn format_frequency(frequency: Frequency, custom_days: Option<&BTreeSet<u8>>) -> String {
    match frequency {
        Frequency::Daily => "Daily".to_string(),
        Frequency::Weekdays => "Weekdays".to_string(),
        Frequency::Weekends => "Weekends".to_string(),
        Frequency::Custom => match custom_days {
            Some(days) if !days.is_empty() => {
                let names: Vec<&str> = days
                    .iter()
                    .filter_map(|day| DAYS_OF_WEEK.get(*day as usize))
                    .map(|day| day.short)
                    .collect();
                format!("Custom ({})", names.join(", "))
            }
            _ => "Custom".to_string(),
        },
    }
}
