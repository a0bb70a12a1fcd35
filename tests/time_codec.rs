#[cfg(test)]
mod tests {
    use rimmer::libs::settings::TimeFormat;
    use rimmer::libs::time::{
        convert_to_12_hour, convert_to_24_hour, duration_to_minutes, format_countdown, format_duration, format_frequency, format_time,
        minutes_to_duration, parse_duration, TimeError, TimeOfDay, TimerDuration,
    };
    use rimmer::libs::timer::Frequency;
    use std::collections::BTreeSet;

    #[test]
    fn test_minutes_to_duration_splits_components() {
        let duration = minutes_to_duration(90.0);
        assert_eq!(
            duration,
            TimerDuration {
                hours: 1,
                minutes: 30,
                seconds: 0,
                milliseconds: 0
            }
        );

        let duration = minutes_to_duration(1440.0);
        assert_eq!((duration.hours, duration.minutes), (24, 0));
    }

    #[test]
    fn test_fractional_minutes_land_in_seconds() {
        let duration = minutes_to_duration(1.5);
        assert_eq!((duration.hours, duration.minutes, duration.seconds, duration.milliseconds), (0, 1, 30, 0));
    }

    #[test]
    fn test_negative_minutes_clamp_to_zero() {
        assert_eq!(minutes_to_duration(-5.0), TimerDuration::default());
    }

    #[test]
    fn test_integer_minutes_survive_the_round_trip() {
        for minutes in [0u32, 1, 59, 60, 61, 125, 1439, 1440] {
            let back = duration_to_minutes(&minutes_to_duration(minutes as f64));
            assert_eq!(back, minutes as f64, "minutes {}", minutes);
        }
    }

    #[test]
    fn test_format_and_parse_duration() {
        let duration = minutes_to_duration(90.0);
        assert_eq!(format_duration(&duration), "01:30:00:00");
        assert_eq!(parse_duration("01:30:00:00"), duration);
        assert_eq!(parse_duration("not a duration"), TimerDuration::default());
        assert_eq!(parse_duration("00:05").minutes, 5);
    }

    #[test]
    fn test_time_of_day_parsing() {
        let time: TimeOfDay = "8:05".parse().unwrap();
        assert_eq!((time.hour(), time.minute()), (8, 5));
        assert_eq!(time.to_string(), "08:05");

        assert_eq!("24:00".parse::<TimeOfDay>(), Err(TimeError::HourOutOfRange(24)));
        assert_eq!("12:60".parse::<TimeOfDay>(), Err(TimeError::MinuteOutOfRange(60)));
        assert!(matches!("1200".parse::<TimeOfDay>(), Err(TimeError::InvalidFormat(_))));
        assert!(matches!("12:5".parse::<TimeOfDay>(), Err(TimeError::InvalidFormat(_))));
        assert!(matches!("ab:cd".parse::<TimeOfDay>(), Err(TimeError::InvalidFormat(_))));
    }

    #[test]
    fn test_time_of_day_serializes_as_string() {
        let time = TimeOfDay::new(7, 0).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"07:00\"");
        assert_eq!(serde_json::from_str::<TimeOfDay>("\"19:45\"").unwrap(), TimeOfDay::new(19, 45).unwrap());
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    #[test]
    fn test_convert_to_12_hour() {
        assert_eq!(convert_to_12_hour("00:00").unwrap(), "12:00 AM");
        assert_eq!(convert_to_12_hour("09:30").unwrap(), "9:30 AM");
        assert_eq!(convert_to_12_hour("12:00").unwrap(), "12:00 PM");
        assert_eq!(convert_to_12_hour("13:05").unwrap(), "1:05 PM");
        assert_eq!(convert_to_12_hour("23:59").unwrap(), "11:59 PM");
    }

    #[test]
    fn test_convert_to_24_hour() {
        assert_eq!(convert_to_24_hour("12:00 AM").unwrap(), "00:00");
        assert_eq!(convert_to_24_hour("12:30 PM").unwrap(), "12:30");
        assert_eq!(convert_to_24_hour("1:05 pm").unwrap(), "13:05");
        assert_eq!(convert_to_24_hour("9:00 AM").unwrap(), "09:00");
    }

    #[test]
    fn test_convert_to_24_hour_rejects_bad_input() {
        assert_eq!(convert_to_24_hour("13:00 PM"), Err(TimeError::HourOutOfRange(13)));
        assert_eq!(convert_to_24_hour("0:30 AM"), Err(TimeError::HourOutOfRange(0)));
        assert_eq!(convert_to_24_hour("1:00 XM"), Err(TimeError::InvalidMeridiem("XM".to_string())));
        assert!(matches!(convert_to_24_hour("1:00"), Err(TimeError::InvalidFormat(_))));
    }

    #[test]
    fn test_12_hour_conversion_is_reversible_for_every_minute() {
        for hour in 0..24 {
            for minute in 0..60 {
                let time24 = TimeOfDay::new(hour, minute).unwrap().to_string();
                let time12 = convert_to_12_hour(&time24).unwrap();
                assert_eq!(convert_to_24_hour(&time12).unwrap(), time24);
            }
        }
    }

    #[test]
    fn test_format_time_follows_preference() {
        let time = TimeOfDay::new(18, 15).unwrap();
        assert_eq!(format_time(&time, TimeFormat::TwentyFourHour), "18:15");
        assert_eq!(format_time(&time, TimeFormat::TwelveHour), "6:15 PM");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(300), "05:00");
        assert_eq!(format_countdown(3600), "1:00:00");
        assert_eq!(format_countdown(3725), "1:02:05");
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(Frequency::Daily, None), "Daily");
        assert_eq!(format_frequency(Frequency::Weekends, None), "Weekends");

        let days: BTreeSet<u8> = [5, 1, 3].into_iter().collect();
        assert_eq!(format_frequency(Frequency::Custom, Some(&days)), "Custom (Mon, Wed, Fri)");
        assert_eq!(format_frequency(Frequency::Custom, None), "Custom");
    }
}
