use crate::domain::{
    CalendarGrid, ClockTime, DateRange, Endpoint, Preset, PresetCatalog, Timezone, YearMonth,
    parse_date,
};
use crate::infrastructure::{ChangeHook, HookRegistry, RangeChanged};
use chrono::{Duration, NaiveDate};

/// Calendar overlay state. Which endpoint the next tap edits lives here, so an
/// open overlay always knows its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarOverlay {
    #[default]
    Closed,
    PickingStart,
    PickingEnd,
}

impl CalendarOverlay {
    pub fn picking(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Start => CalendarOverlay::PickingStart,
            Endpoint::End => CalendarOverlay::PickingEnd,
        }
    }

    pub fn is_open(self) -> bool {
        self != CalendarOverlay::Closed
    }

    /// Endpoint the next calendar tap edits. A closed overlay starts over at Start.
    pub fn editing(self) -> Endpoint {
        match self {
            CalendarOverlay::PickingEnd => Endpoint::End,
            CalendarOverlay::Closed | CalendarOverlay::PickingStart => Endpoint::Start,
        }
    }
}

/// Construction options for a picker.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub initial_start: NaiveDate,
    pub initial_end: NaiveDate,
    pub show_time_selector: bool,
    pub show_presets_by_default: bool,
    pub enable_timezone: bool,
    pub custom_presets: Option<PresetCatalog>,
    pub timezone: Timezone,
}

impl PickerOptions {
    /// Defaults relative to `today`: a week-long range starting today, every panel shown.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            initial_start: today,
            initial_end: today + Duration::days(7),
            show_time_selector: true,
            show_presets_by_default: true,
            enable_timezone: true,
            custom_presets: None,
            timezone: Timezone::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub range: DateRange,
    pub active_preset_id: Option<String>,
    pub overlay: CalendarOverlay,
    pub calendar_cursor: YearMonth,
}

/// Owns the selected range, the calendar cursor and the auxiliary picker flags,
/// and notifies registered hooks once per settled change.
pub struct RangeSelectionModel {
    state: SelectionState,
    catalog: PresetCatalog,
    time: ClockTime,
    include_time: bool,
    show_presets: bool,
    timezone: Timezone,
    show_time_selector: bool,
    enable_timezone: bool,
    hooks: HookRegistry,
}

impl RangeSelectionModel {
    /// `today` seeds the calendar cursor and, absent custom presets, the default catalog.
    pub fn new(options: PickerOptions, today: NaiveDate) -> Self {
        let catalog = options
            .custom_presets
            .unwrap_or_else(|| PresetCatalog::defaults(today));
        let timezone = if options.enable_timezone {
            options.timezone
        } else {
            Timezone::default()
        };

        Self {
            state: SelectionState {
                range: DateRange::new(options.initial_start, options.initial_end),
                active_preset_id: None,
                overlay: CalendarOverlay::Closed,
                calendar_cursor: YearMonth::of(today),
            },
            catalog,
            time: ClockTime::default(),
            include_time: false,
            show_presets: options.show_presets_by_default,
            timezone,
            show_time_selector: options.show_time_selector,
            enable_timezone: options.enable_timezone,
            hooks: HookRegistry::new(),
        }
    }

    pub fn register_hook<H>(&mut self, hook: H)
    where
        H: ChangeHook + 'static,
    {
        self.hooks.register(hook);
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn range(&self) -> DateRange {
        self.state.range
    }

    pub fn active_preset_id(&self) -> Option<&str> {
        self.state.active_preset_id.as_deref()
    }

    pub fn active_preset(&self) -> Option<&Preset> {
        self.active_preset_id().and_then(|id| self.catalog.find(id))
    }

    pub fn overlay(&self) -> CalendarOverlay {
        self.state.overlay
    }

    pub fn editing_endpoint(&self) -> Endpoint {
        self.state.overlay.editing()
    }

    pub fn calendar_cursor(&self) -> YearMonth {
        self.state.calendar_cursor
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn include_time(&self) -> bool {
        self.include_time
    }

    pub fn show_presets(&self) -> bool {
        self.show_presets
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    pub fn show_time_selector(&self) -> bool {
        self.show_time_selector
    }

    pub fn timezone_enabled(&self) -> bool {
        self.enable_timezone
    }

    pub fn snapshot(&self) -> RangeChanged {
        RangeChanged {
            start: self.state.range.start,
            end: self.state.range.end,
            timezone: self.timezone,
            include_time: self.include_time,
        }
    }

    /// Runs `change` and fires at most one range notification for it.
    fn settle<F>(&mut self, change: F)
    where
        F: FnOnce(&mut Self),
    {
        let before = self.snapshot();
        change(self);
        let after = self.snapshot();
        debug_assert!(after.start <= after.end);
        if before != after {
            self.hooks.notify_range_changed(&after);
        }
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        log::debug!("Applying preset '{}'", preset.id);
        self.settle(|model| {
            model.state.range = preset.range();
            model.state.active_preset_id = Some(preset.id.clone());
            model.state.overlay = CalendarOverlay::Closed;
        });
    }

    /// Applies the catalog preset with this id. Unknown ids leave the model untouched.
    pub fn apply_preset_by_id(&mut self, id: &str) -> bool {
        match self.catalog.find(id).cloned() {
            Some(preset) => {
                self.apply_preset(&preset);
                true
            }
            None => {
                log::debug!("No preset with id '{}'", id);
                false
            }
        }
    }

    /// Handles a tap on `day` of the displayed month. Days outside the month are ignored.
    pub fn select_calendar_date(&mut self, day: u32) -> bool {
        let Some(date) = self.state.calendar_cursor.day(day) else {
            log::debug!("Day {} is not in {}", day, self.state.calendar_cursor);
            return false;
        };

        let endpoint = self.editing_endpoint();
        self.settle(|model| {
            model.state.range = model.state.range.with_endpoint(endpoint, date);
            model.state.active_preset_id = None;
            model.state.overlay = match endpoint {
                Endpoint::Start => CalendarOverlay::PickingEnd,
                Endpoint::End => CalendarOverlay::Closed,
            };
        });
        log::debug!("Picked {} as {:?}", date, endpoint);
        true
    }

    /// Sets an endpoint from typed text (`YYYY-MM-DD`). Unparseable input is ignored.
    pub fn set_explicit_date(&mut self, endpoint: Endpoint, input: &str) -> bool {
        match parse_date(input) {
            Some(date) => {
                self.set_date(endpoint, date);
                true
            }
            None => {
                log::debug!("Ignoring invalid {:?} date input {:?}", endpoint, input);
                false
            }
        }
    }

    pub fn set_date(&mut self, endpoint: Endpoint, date: NaiveDate) {
        self.settle(|model| {
            model.state.range = model.state.range.with_endpoint(endpoint, date);
            model.state.active_preset_id = None;
        });
    }

    pub fn navigate_month(&mut self, delta: i32) {
        self.state.calendar_cursor = self.state.calendar_cursor.shift(delta);
    }

    pub fn duration_days(&self) -> i64 {
        self.state.range.duration_days()
    }

    pub fn calendar_grid(&self) -> CalendarGrid {
        CalendarGrid::build(self.state.calendar_cursor, &self.state.range)
    }

    /// Start/End field tap: opens the overlay for `endpoint`, or closes it if open.
    pub fn toggle_calendar(&mut self, endpoint: Endpoint) {
        self.state.overlay = if self.state.overlay.is_open() {
            CalendarOverlay::Closed
        } else {
            CalendarOverlay::picking(endpoint)
        };
    }

    /// Start/End switch inside the open overlay.
    pub fn choose_endpoint(&mut self, endpoint: Endpoint) {
        if self.state.overlay.is_open() {
            self.state.overlay = CalendarOverlay::picking(endpoint);
        }
    }

    pub fn close_calendar(&mut self) {
        self.state.overlay = CalendarOverlay::Closed;
    }

    pub fn set_time(&mut self, time: ClockTime) {
        if self.time != time {
            self.time = time;
            self.hooks.notify_time_changed(time);
        }
    }

    pub fn set_include_time(&mut self, include_time: bool) {
        self.settle(|model| model.include_time = include_time);
    }

    pub fn set_show_presets(&mut self, show_presets: bool) {
        self.show_presets = show_presets;
    }

    /// Ignored when the picker was built without timezone support.
    pub fn set_timezone(&mut self, timezone: Timezone) -> bool {
        if !self.enable_timezone {
            log::debug!("Timezone selection disabled, ignoring {}", timezone);
            return false;
        }
        self.settle(|model| model.timezone = timezone);
        true
    }

    /// Replaces a default catalog with one computed for `now`. Custom catalogs are kept.
    pub fn rebuild_catalog(&mut self, now: NaiveDate) {
        if !self.catalog.is_custom() {
            self.catalog = PresetCatalog::defaults(now);
        }
    }
}
