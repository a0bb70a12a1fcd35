//! Timer data model and creation-form validation.
//!
//! A [`Timer`] is a named reminder with a duration in minutes, one or more
//! daily trigger times and a repeat [`Frequency`]. Its countdown state is
//! transient: `remaining_time` is present exactly while the timer is running
//! and is never written to storage, so a freshly loaded timer is always
//! stopped.

use crate::libs::time::TimeOfDay;
use chrono::{DateTime, Utc, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

pub type TimerId = String;

pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 1440;

/// Which calendar days a timer's trigger times apply to.
#[derive(ValueEnum, Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekdays,
    Weekends,
    Custom,
}

impl Frequency {
    /// Returns whether `weekday` is a firing day. Custom frequencies read the
    /// day indices (0 = Sunday) from `custom_days`.
    pub fn includes(&self, weekday: Weekday, custom_days: Option<&BTreeSet<u8>>) -> bool {
        match self {
            Frequency::Daily => true,
            Frequency::Weekdays => !is_weekend(weekday),
            Frequency::Weekends => is_weekend(weekday),
            Frequency::Custom => custom_days.is_some_and(|days| days.contains(&day_index(weekday))),
        }
    }
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Sunday-based day index, matching the `customDays` encoding.
pub fn day_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Timer name is required")]
    NameRequired,
    #[error("Duration must be between 1 minute and 24 hours")]
    DurationOutOfRange(u32),
    #[error("At least one time is required")]
    TimesRequired,
    #[error("Please select at least one day for custom frequency")]
    CustomDaysRequired,
    #[error("Day {0} is not a day of the week")]
    InvalidDay(u8),
}

impl ValidationError {
    /// The form field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name",
            ValidationError::DurationOutOfRange(_) => "duration",
            ValidationError::TimesRequired => "times",
            ValidationError::CustomDaysRequired | ValidationError::InvalidDay(_) => "customDays",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ValidationErrors {
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

/// The user-editable part of a timer, as submitted by the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimer {
    pub name: String,
    pub duration: u32,
    pub times: Vec<TimeOfDay>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<BTreeSet<u8>>,
}

impl NewTimer {
    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::NameRequired);
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration) {
            errors.push(ValidationError::DurationOutOfRange(self.duration));
        }
        if self.times.is_empty() {
            errors.push(ValidationError::TimesRequired);
        }
        if let Some(days) = &self.custom_days {
            errors.extend(days.iter().filter(|day| **day > 6).map(|day| ValidationError::InvalidDay(*day)));
        }
        if self.frequency == Frequency::Custom && self.custom_days.as_ref().map_or(true, BTreeSet::is_empty) {
            errors.push(ValidationError::CustomDaysRequired);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: TimerId,
    pub name: String,
    /// Length of the countdown in minutes.
    pub duration: u32,
    pub times: Vec<TimeOfDay>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<BTreeSet<u8>>,
    pub enabled: bool,
    /// Seconds left on a running countdown; `None` while stopped.
    #[serde(skip)]
    pub(crate) remaining_time: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timer {
    /// Builds an enabled, stopped timer from a submitted form.
    pub fn new(id: impl Into<TimerId>, draft: NewTimer, at: DateTime<Utc>) -> Self {
        Timer {
            id: id.into(),
            name: draft.name.trim().to_string(),
            duration: draft.duration,
            times: draft.times,
            frequency: draft.frequency,
            custom_days: draft.custom_days,
            enabled: true,
            remaining_time: None,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn is_running(&self) -> bool {
        self.remaining_time.is_some()
    }

    pub fn remaining_time(&self) -> Option<u32> {
        self.remaining_time
    }

    /// Full countdown length in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration * 60
    }

    /// Replaces the editable fields, keeping identity, enabled flag and
    /// countdown state. A running countdown longer than the new duration is
    /// clamped to it.
    pub fn apply_edit(&mut self, draft: NewTimer, at: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.duration = draft.duration;
        self.times = draft.times;
        self.frequency = draft.frequency;
        self.custom_days = draft.custom_days;
        let limit = self.duration_secs();
        self.remaining_time = self.remaining_time.map(|remaining| remaining.min(limit));
        self.updated_at = at;
    }

    pub fn draft(&self) -> NewTimer {
        NewTimer {
            name: self.name.clone(),
            duration: self.duration,
            times: self.times.clone(),
            frequency: self.frequency,
            custom_days: self.custom_days.clone(),
        }
    }

    pub(crate) fn start(&mut self, at: DateTime<Utc>) {
        self.remaining_time = Some(self.duration_secs());
        self.updated_at = at;
    }

    pub(crate) fn stop(&mut self, at: DateTime<Utc>) {
        self.remaining_time = None;
        self.updated_at = at;
    }
}
