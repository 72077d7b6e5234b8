use crate::domain::{ClockTime, Timezone};
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payload of the "range changed" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeChanged {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub timezone: Timezone,
    pub include_time: bool,
}

/// Trait for observers of settled selection changes
pub trait ChangeHook {
    /// Called once per operation that changed the range, timezone or include-time flag
    fn on_range_changed(&self, change: &RangeChanged) -> Result<()>;

    /// Called when the selected time of day changes
    fn on_time_changed(&self, _time: ClockTime) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing change hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn ChangeHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new change hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: ChangeHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    pub fn notify_range_changed(&self, change: &RangeChanged) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_range_changed(change) {
                log::warn!("Hook '{}' failed on range change: {}", hook.name(), e);
            }
        }
    }

    pub fn notify_time_changed(&self, time: ClockTime) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_time_changed(time) {
                log::warn!("Hook '{}' failed on time change: {}", hook.name(), e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Failing;

    impl ChangeHook for Failing {
        fn on_range_changed(&self, _change: &RangeChanged) -> Result<()> {
            anyhow::bail!("boom")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    struct Counting(Rc<RefCell<usize>>);

    impl ChangeHook for Counting {
        fn on_range_changed(&self, _change: &RangeChanged) -> Result<()> {
            *self.0.borrow_mut() += 1;
            Ok(())
        }

        fn name(&self) -> &str {
            "Counting"
        }
    }

    #[test]
    fn test_failing_hook_does_not_stop_others() {
        let count = Rc::new(RefCell::new(0));
        let mut registry = HookRegistry::new();
        registry.register(Failing);
        registry.register(Counting(count.clone()));

        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        registry.notify_range_changed(&RangeChanged {
            start: day,
            end: day,
            timezone: Timezone::Utc,
            include_time: false,
        });

        assert_eq!(*count.borrow(), 1);
        assert_eq!(registry.list_hooks(), vec!["Failing", "Counting"]);
    }

    #[test]
    fn test_range_changed_json_shape() {
        let change = RangeChanged {
            start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            timezone: Timezone::Paris,
            include_time: true,
        };
        let json = serde_json::to_string(&change).unwrap();
        assert_eq!(
            json,
            r#"{"start":"2024-03-10","end":"2024-03-20","timezone":"Europe/Paris","includeTime":true}"#
        );
    }
}
