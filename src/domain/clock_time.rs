use crate::domain::PickerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Time of day, independent of the selected dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Wraps around midnight in both directions.
    pub fn add_minutes(self, minutes: i64) -> Self {
        let total = (self.hour as i64 * 60 + self.minute as i64 + minutes).rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (total / 60) as u32,
            minute: (total % 60) as u32,
        }
    }

    pub fn format_12h(&self) -> String {
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute, suffix)
    }

    pub fn format(&self, clock: ClockFormat) -> String {
        match clock {
            ClockFormat::TwentyFourHour => self.to_string(),
            ClockFormat::TwelveHour => self.format_12h(),
        }
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PickerError::InvalidTime {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let (body, meridiem) = if let Some(body) = upper.strip_suffix("AM") {
            (body.trim_end(), Some(false))
        } else if let Some(body) = upper.strip_suffix("PM") {
            (body.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (hour, minute) = body.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if minute.len() != 2 || hour.is_empty() || hour.len() > 2 || !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        let hour = match meridiem {
            None => hour,
            Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };

        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How a `ClockTime` is shown; storage is always 24h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl FromStr for ClockFormat {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "24" => Ok(ClockFormat::TwentyFourHour),
            "12h" | "12" => Ok(ClockFormat::TwelveHour),
            other => Err(PickerError::UnknownClockFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_24h() {
        let time: ClockTime = "09:05".parse().unwrap();
        assert_eq!((time.hour(), time.minute()), (9, 5));
        assert_eq!(time.to_string(), "09:05");

        let time: ClockTime = "23:59".parse().unwrap();
        assert_eq!(time.to_string(), "23:59");
    }

    #[test]
    fn test_parse_12h() {
        assert_eq!("12:00 AM".parse::<ClockTime>().unwrap().to_string(), "00:00");
        assert_eq!("12:30 pm".parse::<ClockTime>().unwrap().to_string(), "12:30");
        assert_eq!("7:15PM".parse::<ClockTime>().unwrap().to_string(), "19:15");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in [
            "", "24:00", "12:60", "1200", "12:5", "13:00 PM", "0:00 AM", "ab:cd", "+9:+5", "+9:05",
            "09:+5", "-1:00",
        ] {
            assert!(input.parse::<ClockTime>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_format_12h() {
        assert_eq!(ClockTime::new(0, 0).unwrap().format_12h(), "12:00 AM");
        assert_eq!(ClockTime::new(12, 0).unwrap().format_12h(), "12:00 PM");
        assert_eq!(ClockTime::new(18, 45).unwrap().format_12h(), "6:45 PM");
        assert_eq!(
            ClockTime::new(18, 45).unwrap().format(ClockFormat::TwentyFourHour),
            "18:45"
        );
    }

    #[test]
    fn test_add_minutes_wraps_midnight() {
        let late = ClockTime::new(23, 50).unwrap();
        assert_eq!(late.add_minutes(15).to_string(), "00:05");
        let early = ClockTime::new(0, 10).unwrap();
        assert_eq!(early.add_minutes(-20).to_string(), "23:50");
        assert_eq!(early.add_minutes(-60 * 24), early);
    }

    #[test]
    fn test_default_is_noon() {
        assert_eq!(ClockTime::default().to_string(), "12:00");
    }

    #[test]
    fn test_serde_as_string() {
        let time = ClockTime::new(8, 30).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"08:30\"");
        let back: ClockTime = serde_json::from_str("\"08:30\"").unwrap();
        assert_eq!(back, time);
    }

    #[test]
    fn test_clock_format_from_str() {
        assert_eq!("12h".parse::<ClockFormat>().unwrap(), ClockFormat::TwelveHour);
        assert_eq!("24H".parse::<ClockFormat>().unwrap(), ClockFormat::TwentyFourHour);
        assert!("36h".parse::<ClockFormat>().is_err());
    }
}
