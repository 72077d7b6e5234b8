use crate::domain::{ClockFormat, Timezone};

pub struct Config {
    pub theme: String,
    pub clock: ClockFormat,
    pub timezone: Timezone,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults on missing or bad values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let theme = lookup("RANGEPICKER_THEME").unwrap_or_else(|| "dark".to_string());

        let clock = lookup("RANGEPICKER_CLOCK")
            .and_then(|raw| {
                raw.parse::<ClockFormat>()
                    .map_err(|e| log::warn!("Ignoring RANGEPICKER_CLOCK: {}", e))
                    .ok()
            })
            .unwrap_or_default();

        let timezone = lookup("RANGEPICKER_TIMEZONE")
            .and_then(|raw| {
                raw.parse::<Timezone>()
                    .map_err(|e| log::warn!("Ignoring RANGEPICKER_TIMEZONE: {}", e))
                    .ok()
            })
            .unwrap_or_default();

        Self {
            theme,
            clock,
            timezone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.clock, ClockFormat::TwentyFourHour);
        assert_eq!(config.timezone, Timezone::Utc);
    }

    #[test]
    fn test_reads_values_and_ignores_bad_ones() {
        let vars: HashMap<&str, &str> = [
            ("RANGEPICKER_THEME", "light"),
            ("RANGEPICKER_CLOCK", "12h"),
            ("RANGEPICKER_TIMEZONE", "Mars/Olympus"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.theme, "light");
        assert_eq!(config.clock, ClockFormat::TwelveHour);
        assert_eq!(config.timezone, Timezone::Utc);
    }
}
