use crate::domain::ClockTime;
use crate::infrastructure::{ChangeHook, RangeChanged};
use anyhow::Result;

/// Plugin that reports every notification through the `log` facade
pub struct LogHook;

impl ChangeHook for LogHook {
    fn on_range_changed(&self, change: &RangeChanged) -> Result<()> {
        log::info!(
            "Date range changed: {} .. {} ({}, include time: {})",
            change.start,
            change.end,
            change.timezone,
            change.include_time
        );
        Ok(())
    }

    fn on_time_changed(&self, time: ClockTime) -> Result<()> {
        log::info!("Time changed: {}", time);
        Ok(())
    }

    fn name(&self) -> &str {
        "Log"
    }
}
