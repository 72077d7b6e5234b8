use crate::domain::ClockTime;
use crate::infrastructure::{ChangeHook, RangeChanged};
use anyhow::{Context, Result};
use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum Notification<'a> {
    RangeChanged(&'a RangeChanged),
    TimeChanged { time: ClockTime },
}

/// Plugin that writes each notification as one JSON object per line
pub struct JsonLinesHook<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JsonLinesHook<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, notification: &Notification<'_>) -> Result<()> {
        let mut out = self.out.borrow_mut();
        serde_json::to_writer(&mut *out, notification)
            .context("Failed to serialize notification")?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write> ChangeHook for JsonLinesHook<W> {
    fn on_range_changed(&self, change: &RangeChanged) -> Result<()> {
        self.emit(&Notification::RangeChanged(change))
    }

    fn on_time_changed(&self, time: ClockTime) -> Result<()> {
        self.emit(&Notification::TimeChanged { time })
    }

    fn name(&self) -> &str {
        "JSON Lines"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timezone;
    use chrono::NaiveDate;

    #[test]
    fn test_writes_one_line_per_notification() {
        let hook = JsonLinesHook::new(Vec::new());
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        hook.on_range_changed(&RangeChanged {
            start: day,
            end: day,
            timezone: Timezone::Tokyo,
            include_time: false,
        })
        .unwrap();
        hook.on_time_changed(ClockTime::new(9, 30).unwrap()).unwrap();

        let written = String::from_utf8(hook.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"event":"rangeChanged","start":"2024-03-10","end":"2024-03-10","timezone":"Asia/Tokyo","includeTime":false}"#,
                r#"{"event":"timeChanged","time":"09:30"}"#,
            ]
        );
    }
}
