// File: ./src/header.rs
// Month/year and weekday header labels.
use crate::config::WidgetCalendar;
use crate::format::Format;
use chrono::{DateTime, Datelike, FixedOffset, Month, Utc, Weekday};

/// Size of the year relative to the month in the header.
pub const HEADER_RELATIVE_YEAR_SIZE: f32 = 0.7;

pub fn month_label(month: Month) -> String {
    capitalize(month.name())
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthAndYearHeader {
    pub month: String,
    pub year: String,
    pub year_relative_size: f32,
    pub text_relative_size: f32,
}

impl MonthAndYearHeader {
    /// Header for the month containing `now` in the host offset.
    pub fn resolve(
        now: DateTime<Utc>,
        offset: FixedOffset,
        format: &Format,
        calendar: WidgetCalendar,
    ) -> Self {
        let local = now.with_timezone(&offset);
        // month() is always 1..=12
        let month = Month::try_from(local.month() as u8).unwrap_or(Month::January);

        Self {
            month: format.month_header_label(&month_label(month)),
            year: calendar.year(local.year()).to_string(),
            year_relative_size: HEADER_RELATIVE_YEAR_SIZE,
            text_relative_size: format.header_text_relative_size,
        }
    }
}

/// Seven weekday labels starting at `first_day`.
pub fn day_header_labels(first_day: Weekday, format: &Format) -> Vec<String> {
    std::iter::successors(Some(first_day), |d| Some(d.succ()))
        .take(7)
        .map(|d| format.day_header_label(weekday_label(d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_uses_host_offset_for_month() {
        // 2018-12-31 22:30 UTC is already January in Moscow.
        let now = Utc.with_ymd_and_hms(2018, 12, 31, 22, 30, 0).unwrap();
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        let header =
            MonthAndYearHeader::resolve(now, moscow, &Format::default(), WidgetCalendar::Gregorian);
        assert_eq!(header.month, "January");
        assert_eq!(header.year, "2019");
        assert_eq!(header.year_relative_size, 0.7);

        let utc = FixedOffset::east_opt(0).unwrap();
        let header =
            MonthAndYearHeader::resolve(now, utc, &Format::default(), WidgetCalendar::Holocene);
        assert_eq!(header.month, "December");
        assert_eq!(header.year, "12018");
    }

    #[test]
    fn test_narrow_header_truncates_month() {
        let now = Utc.with_ymd_and_hms(2018, 9, 4, 12, 0, 0).unwrap();
        let narrow = Format::for_width(Some(120));
        let header = MonthAndYearHeader::resolve(
            now,
            FixedOffset::east_opt(0).unwrap(),
            &narrow,
            WidgetCalendar::Gregorian,
        );
        assert_eq!(header.month, "Sep");
        assert_eq!(header.text_relative_size, 0.8);
    }

    #[test]
    fn test_day_headers_rotate_from_first_day() {
        let labels = day_header_labels(Weekday::Sun, &Format::default());
        assert_eq!(labels, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);

        let labels = day_header_labels(Weekday::Mon, &Format::for_width(Some(0)));
        assert_eq!(labels, ["M", "T", "W", "T", "F", "S", "S"]);
    }
}
