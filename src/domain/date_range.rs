use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Locale format used for every user-facing date label.
pub const DATE_LABEL_FORMAT: &str = "%b %-d, %Y";

/// Format accepted for dates typed by hand.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT).ok()
}

/// Which side of a range an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

/// Inclusive day range. `start <= end` holds for every value built through this API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two dates in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Sunday..Saturday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// First..last day of the given month, or `None` for an out-of-range year/month.
    pub fn month_of(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }?
        .pred_opt()?;

        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_endpoint(&self, date: NaiveDate) -> bool {
        date == self.start || date == self.end
    }

    /// Inclusive day count; a single-day range is 1.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Moves one endpoint to `date`, dragging the other along when the pair would cross.
    pub fn with_endpoint(self, endpoint: Endpoint, date: NaiveDate) -> Self {
        match endpoint {
            Endpoint::Start => Self {
                start: date,
                end: self.end.max(date),
            },
            Endpoint::End => Self {
                start: self.start.min(date),
                end: date,
            },
        }
    }

    pub fn label(&self) -> String {
        format!("{} - {}", format_date(self.start), format_date(self.end))
    }

    pub fn duration_label(&self) -> String {
        let days = self.duration_days();
        if days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_orders_endpoints() {
        let range = DateRange::new(date(2024, 3, 20), date(2024, 3, 10));
        assert_eq!(range.start, date(2024, 3, 10));
        assert_eq!(range.end, date(2024, 3, 20));
    }

    #[test]
    fn test_duration_is_inclusive() {
        assert_eq!(DateRange::day(date(2024, 3, 10)).duration_days(), 1);
        let week = DateRange::new(date(2024, 3, 10), date(2024, 3, 16));
        assert_eq!(week.duration_days(), 7);
    }

    #[test]
    fn test_week_of_starts_on_sunday() {
        // 2024-03-13 is a Wednesday
        let week = DateRange::week_of(date(2024, 3, 13));
        assert_eq!(week.start, date(2024, 3, 10));
        assert_eq!(week.end, date(2024, 3, 16));

        let sunday = DateRange::week_of(date(2024, 3, 10));
        assert_eq!(sunday.start, date(2024, 3, 10));
    }

    #[test]
    fn test_month_of_handles_leap_and_december() {
        let feb = DateRange::month_of(2024, 2).unwrap();
        assert_eq!(feb.end, date(2024, 2, 29));
        let dec = DateRange::month_of(2023, 12).unwrap();
        assert_eq!(dec.end, date(2023, 12, 31));
        assert!(DateRange::month_of(2024, 13).is_none());
    }

    #[test]
    fn test_with_endpoint_drags_other_side() {
        let base = DateRange::new(date(2024, 3, 10), date(2024, 3, 20));

        let moved = base.with_endpoint(Endpoint::Start, date(2024, 3, 25));
        assert_eq!(moved, DateRange::day(date(2024, 3, 25)));

        let moved = base.with_endpoint(Endpoint::End, date(2024, 3, 5));
        assert_eq!(moved, DateRange::day(date(2024, 3, 5)));

        let inside = base.with_endpoint(Endpoint::End, date(2024, 3, 15));
        assert_eq!(inside, DateRange::new(date(2024, 3, 10), date(2024, 3, 15)));
    }

    #[test]
    fn test_labels() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 10));
        assert_eq!(range.label(), "Mar 1, 2024 - Mar 10, 2024");
        assert_eq!(range.duration_label(), "10 days");
        assert_eq!(DateRange::day(date(2024, 3, 1)).duration_label(), "1 day");
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        assert_eq!(parse_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date(" 2024-03-01 "), Some(date(2024, 3, 1)));
        assert!(parse_date("2023-02-29").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }
}
