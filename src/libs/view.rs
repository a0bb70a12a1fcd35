use super::settings::{AppSettings, TimeFormat};
use super::time::{format_countdown, format_duration, format_frequency, format_time, minutes_to_duration};
use super::timer::Timer;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn timers(timers: &[Timer], time_format: TimeFormat) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DURATION", "TIMES", "REPEAT", "ENABLED", "REMAINING"]);
        for timer in timers {
            let times: Vec<String> = timer.times.iter().map(|time| format_time(time, time_format)).collect();
            table.add_row(row![
                timer.id,
                timer.name,
                format_duration(&minutes_to_duration(timer.duration as f64)),
                times.join(", "),
                format_frequency(timer.frequency, timer.custom_days.as_ref()),
                if timer.enabled { "yes" } else { "no" },
                timer.remaining_time().map(format_countdown).unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();
    }

    pub fn settings(settings: &AppSettings) {
        let mut table = Table::new();

        table.add_row(row!["THEME", "TIME FORMAT", "NOTIFICATIONS"]);
        table.add_row(row![
            settings.theme,
            settings.time_format,
            if settings.notifications_enabled { "on" } else { "off" }
        ]);
        table.printstd();
    }
}
