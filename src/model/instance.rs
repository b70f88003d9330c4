// File: ./src/model/instance.rs
use crate::color_utils;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::Serialize;

/// One occurrence of a calendar event, as read from the provider.
///
/// Immutable once built: fields are private and only exposed through
/// accessors. `date_start <= date_end` is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    id: String,
    calendar_id: String,
    calendar_display_name: String,
    title: String,
    description: String,
    date_start: DateTime<FixedOffset>,
    date_end: DateTime<FixedOffset>,
    color: String,
}

impl Instance {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        calendar_id: String,
        calendar_display_name: String,
        title: String,
        description: String,
        date_start: DateTime<FixedOffset>,
        date_end: DateTime<FixedOffset>,
        color: String,
    ) -> Self {
        Self {
            id,
            calendar_id,
            calendar_display_name,
            title,
            description,
            date_start,
            date_end,
            color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    pub fn calendar_display_name(&self) -> &str {
        &self.calendar_display_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date_start(&self) -> DateTime<FixedOffset> {
        self.date_start
    }

    pub fn date_end(&self) -> DateTime<FixedOffset> {
        self.date_end
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Negative when the provider returned an end before the start.
    pub fn duration(&self) -> Duration {
        self.date_end - self.date_start
    }

    /// Whether the instance overlaps the given day, in the instance's own offset.
    /// Zero-length instances count on the day they start.
    pub fn is_in_day(&self, day: NaiveDate) -> bool {
        let start = self.date_start.naive_local();
        let end = self.date_end.naive_local();
        let Some(day_start) = day.and_hms_opt(0, 0, 0) else {
            return false;
        };
        let Some(next_day) = day.succ_opt().and_then(|d| d.and_hms_opt(0, 0, 0)) else {
            return start >= day_start;
        };

        if start == end {
            return start >= day_start && start < next_day;
        }
        start < next_day && end > day_start
    }

    /// Decoded provider colour, if the encoding is recognised.
    pub fn color_rgb(&self) -> Option<(u8, u8, u8)> {
        color_utils::parse_provider_color(&self.color)
    }
}

/// Number of instances overlapping `day`.
pub fn count_in_day(instances: &[Instance], day: NaiveDate) -> usize {
    instances.iter().filter(|i| i.is_in_day(day)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instance_between(start: (u32, u32, u32), end: (u32, u32, u32)) -> Instance {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let at = |(d, h, m): (u32, u32, u32)| tz.with_ymd_and_hms(2018, 12, d, h, m, 0).unwrap();
        Instance::new(
            "1".to_string(),
            "10".to_string(),
            "Work".to_string(),
            "Standup".to_string(),
            String::new(),
            at(start),
            at(end),
            "#00FF00".to_string(),
        )
    }

    fn dec(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 12, day).unwrap()
    }

    #[test]
    fn test_is_in_day_for_same_day_instance() {
        let i = instance_between((4, 9, 0), (4, 10, 0));
        assert!(i.is_in_day(dec(4)));
        assert!(!i.is_in_day(dec(3)));
        assert!(!i.is_in_day(dec(5)));
    }

    #[test]
    fn test_is_in_day_for_multi_day_instance() {
        let i = instance_between((3, 22, 0), (6, 0, 0));
        assert!(i.is_in_day(dec(3)));
        assert!(i.is_in_day(dec(4)));
        assert!(i.is_in_day(dec(5)));
        // Ends exactly at midnight: not on the 6th.
        assert!(!i.is_in_day(dec(6)));
    }

    #[test]
    fn test_is_in_day_for_zero_length_instance() {
        let i = instance_between((4, 0, 0), (4, 0, 0));
        assert!(i.is_in_day(dec(4)));
        assert!(!i.is_in_day(dec(3)));
    }

    #[test]
    fn test_count_in_day_and_duration() {
        let instances = vec![
            instance_between((4, 9, 0), (4, 10, 0)),
            instance_between((4, 23, 0), (5, 1, 0)),
            instance_between((6, 9, 0), (6, 9, 30)),
        ];
        assert_eq!(count_in_day(&instances, dec(4)), 2);
        assert_eq!(count_in_day(&instances, dec(5)), 1);
        assert_eq!(count_in_day(&instances, dec(7)), 0);
        assert_eq!(instances[2].duration(), Duration::minutes(30));
        assert_eq!(instances[0].color_rgb(), Some((0, 255, 0)));
    }
}
