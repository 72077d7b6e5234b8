use crate::domain::ClockTime;
use crate::infrastructure::{ChangeHook, RangeChanged};
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Latest values seen by a `LiveDataHook`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveData {
    pub range: Option<RangeChanged>,
    pub time: Option<ClockTime>,
    pub range_events: usize,
    pub time_events: usize,
}

/// Plugin that mirrors notifications into shared state for an on-screen panel
pub struct LiveDataHook {
    data: Rc<RefCell<LiveData>>,
}

impl LiveDataHook {
    pub fn new() -> (Self, Rc<RefCell<LiveData>>) {
        let data = Rc::new(RefCell::new(LiveData::default()));
        (Self { data: data.clone() }, data)
    }
}

impl ChangeHook for LiveDataHook {
    fn on_range_changed(&self, change: &RangeChanged) -> Result<()> {
        let mut data = self.data.borrow_mut();
        data.range = Some(*change);
        data.range_events += 1;
        Ok(())
    }

    fn on_time_changed(&self, time: ClockTime) -> Result<()> {
        let mut data = self.data.borrow_mut();
        data.time = Some(time);
        data.time_events += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "Live Data"
    }
}
