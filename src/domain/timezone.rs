use crate::domain::PickerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Advisory timezone carried next to the range. It never shifts the stored dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timezone {
    #[default]
    #[serde(rename = "UTC")]
    Utc,
    #[serde(rename = "America/New_York")]
    NewYork,
    #[serde(rename = "America/Chicago")]
    Chicago,
    #[serde(rename = "America/Denver")]
    Denver,
    #[serde(rename = "America/Los_Angeles")]
    LosAngeles,
    #[serde(rename = "Europe/London")]
    London,
    #[serde(rename = "Europe/Paris")]
    Paris,
    #[serde(rename = "Asia/Tokyo")]
    Tokyo,
    #[serde(rename = "Asia/Shanghai")]
    Shanghai,
}

impl Timezone {
    pub const ALL: [Timezone; 9] = [
        Timezone::Utc,
        Timezone::NewYork,
        Timezone::Chicago,
        Timezone::Denver,
        Timezone::LosAngeles,
        Timezone::London,
        Timezone::Paris,
        Timezone::Tokyo,
        Timezone::Shanghai,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Timezone::Utc => "UTC",
            Timezone::NewYork => "America/New_York",
            Timezone::Chicago => "America/Chicago",
            Timezone::Denver => "America/Denver",
            Timezone::LosAngeles => "America/Los_Angeles",
            Timezone::London => "Europe/London",
            Timezone::Paris => "Europe/Paris",
            Timezone::Tokyo => "Asia/Tokyo",
            Timezone::Shanghai => "Asia/Shanghai",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timezone::Utc => "UTC",
            Timezone::NewYork => "Eastern Time",
            Timezone::Chicago => "Central Time",
            Timezone::Denver => "Mountain Time",
            Timezone::LosAngeles => "Pacific Time",
            Timezone::London => "London",
            Timezone::Paris => "Paris",
            Timezone::Tokyo => "Tokyo",
            Timezone::Shanghai => "Shanghai",
        }
    }

    /// Next entry in `ALL`, wrapping; used by dropdown-style cycling.
    pub fn cycle(self, step: i32) -> Self {
        let len = Self::ALL.len() as i32;
        let index = Self::ALL.iter().position(|tz| *tz == self).unwrap_or(0) as i32;
        Self::ALL[(index + step).rem_euclid(len) as usize]
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Timezone {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tz| tz.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PickerError::UnknownTimezone(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_ids() {
        for tz in Timezone::ALL {
            assert_eq!(tz.id().parse::<Timezone>().unwrap(), tz);
        }
        assert_eq!("europe/paris".parse::<Timezone>().unwrap(), Timezone::Paris);
    }

    #[test]
    fn test_rejects_unlisted_zone() {
        let err = "Australia/Sydney".parse::<Timezone>().unwrap_err();
        assert_eq!(err, PickerError::UnknownTimezone("Australia/Sydney".to_string()));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Timezone::Utc.cycle(1), Timezone::NewYork);
        assert_eq!(Timezone::Utc.cycle(-1), Timezone::Shanghai);
        assert_eq!(Timezone::Shanghai.cycle(1), Timezone::Utc);
    }

    #[test]
    fn test_serializes_as_iana_id() {
        assert_eq!(
            serde_json::to_string(&Timezone::LosAngeles).unwrap(),
            "\"America/Los_Angeles\""
        );
        assert_eq!(Timezone::default(), Timezone::Utc);
        assert_eq!(Timezone::Tokyo.label(), "Tokyo");
    }
}
