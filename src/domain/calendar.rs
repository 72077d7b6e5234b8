use crate::domain::DateRange;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Month shown by the calendar overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
            .ok_or_else(|| format!("invalid month {}-{:02}", raw.year, raw.month))
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-based
    pub fn month(self) -> u32 {
        self.month
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Shifts by whole months, carrying into the year.
    pub fn shift(self, delta: i32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn days_in_month(self) -> u32 {
        DateRange::month_of(self.year, self.month)
            .map(|range| range.end.day())
            .unwrap_or(0)
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn first_weekday_index(self) -> u32 {
        self.first_day()
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("?")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub in_range: bool,
    pub is_endpoint: bool,
}

/// One month laid out Sunday-first, with range membership precomputed per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub month: YearMonth,
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl CalendarGrid {
    pub fn build(month: YearMonth, range: &DateRange) -> Self {
        let cells = (1..=month.days_in_month())
            .filter_map(|day| month.day(day).map(|date| (day, date)))
            .map(|(day, date)| DayCell {
                day,
                date,
                in_range: range.contains(date),
                is_endpoint: range.is_endpoint(date),
            })
            .collect();

        Self {
            month,
            leading_blanks: month.first_weekday_index(),
            cells,
        }
    }

    /// Rows of seven slots; `None` marks a blank before the 1st or after the last day.
    pub fn weeks(&self) -> Vec<[Option<DayCell>; 7]> {
        let mut slots: Vec<Option<DayCell>> = (0..self.leading_blanks).map(|_| None).collect();
        slots.extend(self.cells.iter().copied().map(Some));
        while slots.len() % 7 != 0 {
            slots.push(None);
        }

        slots
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week.copy_from_slice(chunk);
                week
            })
            .collect()
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.day == day)
    }
}
