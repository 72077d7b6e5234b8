use crate::domain::{DateRange, PickerError};
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Named date-range shortcut. Dates are fixed when the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Preset {
    pub fn new(id: impl Into<String>, label: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start: range.start,
            end: range.end,
        }
    }

    /// The preset's dates as a range, ordered even if a caller supplied them reversed.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

/// Built-in catalog choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetSet {
    #[default]
    Default,
    Business,
}

impl PresetSet {
    pub fn build(self, now: NaiveDate) -> PresetCatalog {
        match self {
            PresetSet::Default => PresetCatalog::defaults(now),
            PresetSet::Business => PresetCatalog::business(now),
        }
    }
}

impl FromStr for PresetSet {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(PresetSet::Default),
            "business" => Ok(PresetSet::Business),
            other => Err(PickerError::UnknownPresetSet(other.to_string())),
        }
    }
}

/// Ordered list of presets, matched by id only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
    custom: bool,
}

impl PresetCatalog {
    /// Today, Yesterday, Last 7/30 days, This week, This month, Next 7/30 days.
    pub fn defaults(now: NaiveDate) -> Self {
        let yesterday = now - Duration::days(1);
        let this_month = DateRange::month_of(now.year(), now.month())
            .unwrap_or_else(|| DateRange::day(now));

        let presets = vec![
            Preset::new("today", "Today", DateRange::day(now)),
            Preset::new("yesterday", "Yesterday", DateRange::day(yesterday)),
            Preset::new(
                "last7days",
                "Last 7 days",
                DateRange::new(now - Duration::days(7), now),
            ),
            Preset::new(
                "last30days",
                "Last 30 days",
                DateRange::new(now - Duration::days(30), now),
            ),
            Preset::new("thisweek", "This week", DateRange::week_of(now)),
            Preset::new("thismonth", "This month", this_month),
            Preset::new(
                "next7days",
                "Next 7 days",
                DateRange::new(now, now + Duration::days(7)),
            ),
            Preset::new(
                "next30days",
                "Next 30 days",
                DateRange::new(now, now + Duration::days(30)),
            ),
        ];

        Self {
            presets,
            custom: false,
        }
    }

    /// Quarter/year shortcuts for reporting screens.
    pub fn business(now: NaiveDate) -> Self {
        let quarter = Months::new(3);
        let last_quarter_start = now.checked_sub_months(quarter).unwrap_or(now);
        let next_quarter_end = now.checked_add_months(quarter).unwrap_or(now);
        let year_start = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now);

        let presets = vec![
            Preset::new(
                "lastquarter",
                "Last Quarter",
                DateRange::new(last_quarter_start, now),
            ),
            Preset::new("thisyear", "This Year", DateRange::new(year_start, now)),
            Preset::new(
                "nextquarter",
                "Next Quarter",
                DateRange::new(now, next_quarter_end),
            ),
        ];

        Self {
            presets,
            custom: true,
        }
    }

    /// Caller-supplied catalog. Ids must be unique.
    pub fn custom(presets: Vec<Preset>) -> Result<Self, PickerError> {
        let mut seen = HashSet::new();
        for preset in &presets {
            if !seen.insert(preset.id.as_str()) {
                return Err(PickerError::DuplicatePreset(preset.id.clone()));
            }
        }

        Ok(Self {
            presets,
            custom: true,
        })
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn find(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
