use crate::application::{Config, PickerResult, PickerUi, PickerView, TextRenderer, Theme};
use crate::domain::{
    CalendarGrid, DateRange, PickerOptions, PresetCatalog, PresetSet, RangeSelectionModel,
    YearMonth,
};
use crate::infrastructure::{JsonLinesHook, LiveDataHook, LogHook, RangeChanged};
use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Settings gathered from the command line for one picker session.
#[derive(Debug, Clone, Default)]
pub struct PickerSettings {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub show_time_selector: bool,
    pub show_presets: bool,
    pub enable_timezone: bool,
    pub preset_set: PresetSet,
    pub events_path: Option<PathBuf>,
}

pub struct PickerApp {
    config: Config,
    today: NaiveDate,
}

impl PickerApp {
    pub fn new() -> Self {
        Self::with_config(Config::from_env(), Local::now().date_naive())
    }

    pub fn with_config(config: Config, today: NaiveDate) -> Self {
        if !Theme::available_themes().contains(&config.theme.to_lowercase()) {
            log::warn!("Unknown theme '{}', using dark", config.theme);
        }
        Self { config, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn options(&self, settings: &PickerSettings) -> PickerOptions {
        let mut options = PickerOptions::starting(self.today);
        if let Some(start) = settings.start {
            options.initial_start = start;
            options.initial_end = start + Duration::days(7);
        }
        if let Some(end) = settings.end {
            options.initial_end = end;
        }
        options.show_time_selector = settings.show_time_selector;
        options.show_presets_by_default = settings.show_presets;
        options.enable_timezone = settings.enable_timezone;
        options.timezone = self.config.timezone;
        if settings.preset_set != PresetSet::Default {
            options.custom_presets = Some(settings.preset_set.build(self.today));
        }
        options
    }

    /// Model with the logging hook and, if requested, a JSON event log attached.
    pub fn build_model(&self, settings: &PickerSettings) -> Result<RangeSelectionModel> {
        let mut model = RangeSelectionModel::new(self.options(settings), self.today);
        model.register_hook(LogHook);

        if let Some(path) = &settings.events_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open event log {}", path.display()))?;
            model.register_hook(JsonLinesHook::new(file));
        }

        log::debug!("Registered hooks: {:?}", model.hooks().list_hooks());
        Ok(model)
    }

    /// Runs the interactive picker and returns the final selection, if not cancelled.
    pub fn run_picker(&self, settings: &PickerSettings) -> Result<Option<RangeChanged>> {
        let mut model = self.build_model(settings)?;
        let (live_hook, live) = LiveDataHook::new();
        model.register_hook(live_hook);

        let ui = PickerUi::new(&mut model, self.today)
            .with_theme(Theme::by_name(&self.config.theme))
            .with_clock(self.config.clock)
            .with_live_data(live);

        let result = PickerView::new(ui)
            .context("Failed to start the terminal interface")?
            .run()
            .context("Terminal interface failed")?;

        match result {
            PickerResult::Exited(change) => {
                log::info!("Picker closed with {} .. {}", change.start, change.end);
                Ok(Some(change))
            }
            PickerResult::Cancelled => Ok(None),
        }
    }

    pub fn presets_text(&self, set: PresetSet, now: NaiveDate, json: bool) -> Result<String> {
        let catalog: PresetCatalog = set.build(now);
        if json {
            let presets: Vec<_> = catalog.iter().collect();
            return serde_json::to_string_pretty(&presets).context("Failed to serialize presets");
        }
        Ok(self.renderer().render_presets(&catalog))
    }

    pub fn grid_text(&self, month: Option<YearMonth>, range: DateRange) -> String {
        let month = month.unwrap_or_else(|| YearMonth::of(range.start));
        let grid = CalendarGrid::build(month, &range);
        let mut out = self.renderer().render_grid(&grid, self.today);
        out.push('\n');
        out.push_str(&self.renderer().render_range(&range));
        out
    }

    fn renderer(&self) -> TextRenderer {
        if crossterm::tty::IsTty::is_tty(&std::io::stdout()) {
            TextRenderer::new(Theme::by_name(&self.config.theme))
        } else {
            TextRenderer::plain()
        }
    }
}

impl Default for PickerApp {
    fn default() -> Self {
        Self::new()
    }
}
