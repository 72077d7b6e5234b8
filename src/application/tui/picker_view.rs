use super::icons;
use super::theme::Theme;
use crate::domain::{
    CalendarGrid, ClockFormat, DATE_INPUT_FORMAT, DateRange, Endpoint, RangeSelectionModel,
    Timezone, WEEKDAY_HEADERS, YearMonth, format_date,
};
use crate::infrastructure::{LiveData, RangeChanged};
use chrono::{Datelike, NaiveDate};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::cell::RefCell;
use std::io::{self, Stdout, stdout};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerResult {
    /// User closed the picker normally (q / Esc)
    Exited(RangeChanged),
    /// User aborted with Ctrl+C / Ctrl+D
    Cancelled,
}

/// Panel that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Presets,
    Calendar,
    Time,
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionRow {
    IncludeTime,
    ShowPresets,
    Timezone,
}

/// Typed date entry in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInput {
    pub endpoint: Endpoint,
    pub buffer: String,
}

/// Picker screen state and key handling, independent of the real terminal.
pub struct PickerUi<'a> {
    model: &'a mut RangeSelectionModel,
    live: Option<Rc<RefCell<LiveData>>>,
    today: NaiveDate,
    focus: Focus,
    preset_cursor: usize,
    day_cursor: u32,
    option_cursor: usize,
    input: Option<DateInput>,
    should_exit: bool,
    cancelled: bool,
    show_help: bool,
    clock: ClockFormat,
    theme: Theme,
}

impl<'a> PickerUi<'a> {
    pub fn new(model: &'a mut RangeSelectionModel, today: NaiveDate) -> Self {
        let day_cursor = Self::initial_day(model.calendar_cursor(), model.range().start);
        let focus = if model.show_presets() && !model.catalog().is_empty() {
            Focus::Presets
        } else {
            Focus::Calendar
        };

        Self {
            model,
            live: None,
            today,
            focus,
            preset_cursor: 0,
            day_cursor,
            option_cursor: 0,
            input: None,
            should_exit: false,
            cancelled: false,
            show_help: false,
            clock: ClockFormat::default(),
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_clock(mut self, clock: ClockFormat) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_live_data(mut self, live: Rc<RefCell<LiveData>>) -> Self {
        self.live = Some(live);
        self
    }

    pub fn model(&self) -> &RangeSelectionModel {
        &*self.model
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn day_cursor(&self) -> u32 {
        self.day_cursor
    }

    pub fn input(&self) -> Option<&DateInput> {
        self.input.as_ref()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn result(&self) -> PickerResult {
        if self.cancelled {
            PickerResult::Cancelled
        } else {
            PickerResult::Exited(self.model.snapshot())
        }
    }

    /// Day of `month` to highlight first: `date` if it falls in that month, else the 1st.
    fn initial_day(month: YearMonth, date: NaiveDate) -> u32 {
        if YearMonth::of(date) == month {
            date.day()
        } else {
            1
        }
    }

    fn option_rows(&self) -> Vec<OptionRow> {
        let mut rows = vec![OptionRow::IncludeTime, OptionRow::ShowPresets];
        if self.model.timezone_enabled() {
            rows.push(OptionRow::Timezone);
        }
        rows
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order = Vec::new();
        if self.model.show_presets() && !self.model.catalog().is_empty() {
            order.push(Focus::Presets);
        }
        order.push(Focus::Calendar);
        if self.model.show_time_selector() {
            order.push(Focus::Time);
        }
        order.push(Focus::Options);
        order
    }

    fn cycle_focus(&mut self, step: i32) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0) as i32;
        let next = (index + step).rem_euclid(order.len() as i32) as usize;
        self.focus = order[next];
    }

    /// Keeps focus valid after a panel was hidden.
    fn settle_focus(&mut self) {
        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::Calendar;
        }
    }

    fn clamp_day_cursor(&mut self) {
        let days = self.model.calendar_cursor().days_in_month().max(1);
        self.day_cursor = self.day_cursor.clamp(1, days);
    }

    fn move_day_cursor(&mut self, delta: i64) {
        let days = self.model.calendar_cursor().days_in_month() as i64;
        let target = self.day_cursor as i64 + delta;
        if target < 1 {
            self.model.navigate_month(-1);
            let previous = self.model.calendar_cursor().days_in_month() as i64;
            self.day_cursor = (previous + target).max(1) as u32;
        } else if target > days {
            self.model.navigate_month(1);
            self.day_cursor = (target - days) as u32;
        } else {
            self.day_cursor = target as u32;
        }
        self.clamp_day_cursor();
    }

    fn open_calendar(&mut self, endpoint: Endpoint) {
        self.model.toggle_calendar(endpoint);
        if self.model.overlay().is_open() {
            let date = match endpoint {
                Endpoint::Start => self.model.range().start,
                Endpoint::End => self.model.range().end,
            };
            self.day_cursor = Self::initial_day(self.model.calendar_cursor(), date);
        }
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if matches!(
            (key.code, key.modifiers),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('d'), KeyModifiers::CONTROL)
        ) {
            self.cancelled = true;
            self.should_exit = true;
            return;
        }

        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.model.overlay().is_open() {
                    self.model.close_calendar();
                } else {
                    self.should_exit = true;
                }
            }
            KeyCode::Tab => self.cycle_focus(1),
            KeyCode::BackTab => self.cycle_focus(-1),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('p') => {
                let show = !self.model.show_presets();
                self.model.set_show_presets(show);
                self.settle_focus();
            }
            KeyCode::Char('d') => self.start_input(Endpoint::Start),
            KeyCode::Char('D') => self.start_input(Endpoint::End),
            KeyCode::Char('[') | KeyCode::PageUp => {
                self.model.navigate_month(-1);
                self.clamp_day_cursor();
            }
            KeyCode::Char(']') | KeyCode::PageDown => {
                self.model.navigate_month(1);
                self.clamp_day_cursor();
            }
            _ => match self.focus {
                Focus::Presets => self.handle_presets_key(key),
                Focus::Calendar => self.handle_calendar_key(key),
                Focus::Time => self.handle_time_key(key),
                Focus::Options => self.handle_options_key(key),
            },
        }
    }

    fn start_input(&mut self, endpoint: Endpoint) {
        let current = match endpoint {
            Endpoint::Start => self.model.range().start,
            Endpoint::End => self.model.range().end,
        };
        self.input = Some(DateInput {
            endpoint,
            buffer: current.format(DATE_INPUT_FORMAT).to_string(),
        });
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input = None,
            KeyCode::Enter => {
                if let Some(input) = self.input.take() {
                    self.model.set_explicit_date(input.endpoint, &input.buffer);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.input.as_mut() {
                    input.buffer.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if let Some(input) = self.input.as_mut().filter(|input| input.buffer.len() < 10) {
                    input.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_presets_key(&mut self, key: KeyEvent) {
        let count = self.model.catalog().len();
        if count == 0 {
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                self.preset_cursor = (self.preset_cursor + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                self.preset_cursor = (self.preset_cursor + 1) % count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(preset) = self.model.catalog().get(self.preset_cursor).cloned() {
                    self.model.apply_preset(&preset);
                }
            }
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') => self.open_calendar(Endpoint::Start),
            KeyCode::Char('e') => self.open_calendar(Endpoint::End),
            KeyCode::Char('1') => self.model.choose_endpoint(Endpoint::Start),
            KeyCode::Char('2') => self.model.choose_endpoint(Endpoint::End),
            KeyCode::Char('t') => {
                let cursor = self.model.calendar_cursor();
                let months = (self.today.year() - cursor.year()) * 12 + self.today.month() as i32
                    - cursor.month() as i32;
                self.model.navigate_month(months);
                self.day_cursor = self.today.day();
            }
            _ if !self.model.overlay().is_open() => {}
            KeyCode::Left | KeyCode::Char('h') => self.move_day_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_day_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_day_cursor(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_day_cursor(7),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.model.select_calendar_date(self.day_cursor);
            }
            _ => {}
        }
    }

    fn handle_time_key(&mut self, key: KeyEvent) {
        let time = self.model.time();
        let adjusted = match key.code {
            KeyCode::Up | KeyCode::Char('k') => time.add_minutes(60),
            KeyCode::Down | KeyCode::Char('j') => time.add_minutes(-60),
            KeyCode::Right | KeyCode::Char('l') => time.add_minutes(15),
            KeyCode::Left | KeyCode::Char('h') => time.add_minutes(-15),
            _ => return,
        };
        self.model.set_time(adjusted);
    }

    fn handle_options_key(&mut self, key: KeyEvent) {
        let rows = self.option_rows();
        self.option_cursor = self.option_cursor.min(rows.len() - 1);
        let row = rows[self.option_cursor];

        match (key.code, row) {
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.option_cursor = (self.option_cursor + rows.len() - 1) % rows.len();
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                self.option_cursor = (self.option_cursor + 1) % rows.len();
            }
            (KeyCode::Enter | KeyCode::Char(' '), OptionRow::IncludeTime) => {
                let include = !self.model.include_time();
                self.model.set_include_time(include);
            }
            (KeyCode::Enter | KeyCode::Char(' '), OptionRow::ShowPresets) => {
                let show = !self.model.show_presets();
                self.model.set_show_presets(show);
            }
            (KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l'), OptionRow::Timezone) => {
                self.model.set_timezone(self.model.timezone().cycle(1));
            }
            (KeyCode::Left | KeyCode::Char('h'), OptionRow::Timezone) => {
                self.model.set_timezone(self.model.timezone().cycle(-1));
            }
            _ => {}
        }
    }

    fn block(&self, title: &str, focused: bool) -> Block<'static> {
        let border = if focused {
            self.theme.colors.focused_border.to_ratatui()
        } else {
            self.theme.colors.border.to_ratatui()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title.to_string())
            .title_style(self.theme.colors.header.to_ratatui())
    }

    fn presets_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let active = self.model.active_preset_id();
        let focused = self.focus == Focus::Presets;

        let spans: Vec<Span> = self
            .model
            .catalog()
            .iter()
            .enumerate()
            .flat_map(|(i, preset)| {
                let mut style = if active == Some(preset.id.as_str()) {
                    colors.active_preset.to_ratatui_with_modifier(Modifier::BOLD)
                } else {
                    colors.normal_text.to_ratatui()
                };
                if focused && i == self.preset_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                [
                    Span::styled(
                        format!(" {} {} ", icons::preset_icon(&preset.id), preset.label),
                        style,
                    ),
                    Span::raw(" "),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(self.block("Quick Select Presets (p: hide)", focused))
    }

    fn date_fields_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let range = self.model.range();
        let overlay = self.model.overlay();

        let field = |label: &str, endpoint: Endpoint, date: NaiveDate| -> Vec<Span<'static>> {
            let editing = overlay.is_open() && overlay.editing() == endpoint;
            let typed = self.input.as_ref().filter(|input| input.endpoint == endpoint);
            let value = match typed {
                Some(input) => format!("{}_", input.buffer),
                None => format_date(date),
            };
            let style = if editing || typed.is_some() {
                colors.endpoint.to_ratatui_with_modifier(Modifier::BOLD)
            } else {
                colors.normal_text.to_ratatui()
            };
            vec![
                Span::styled(format!("{}: ", label), colors.dimmed.to_ratatui()),
                Span::styled(format!(" {} ", value), style),
                Span::raw("   "),
            ]
        };

        let mut spans = field("Start Date", Endpoint::Start, range.start);
        spans.extend(field("End Date", Endpoint::End, range.end));

        Paragraph::new(Line::from(spans))
            .block(self.block("Custom Date Range", self.focus == Focus::Calendar))
    }

    fn calendar_widget(&self, grid: &CalendarGrid) -> Table<'static> {
        let colors = &self.theme.colors;

        let header = Row::new(
            WEEKDAY_HEADERS
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let style = if i == 0 || i == 6 {
                        colors.weekend.to_ratatui()
                    } else {
                        colors.header.to_ratatui()
                    };
                    Cell::from(*name).style(style)
                })
                .collect::<Vec<_>>(),
        );

        let rows: Vec<Row> = grid
            .weeks()
            .into_iter()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .enumerate()
                    .map(|(weekday, slot)| match slot {
                        None => Cell::from(""),
                        Some(cell) => {
                            let mut style = if cell.is_endpoint {
                                colors.endpoint.to_ratatui_with_modifier(Modifier::BOLD)
                            } else if cell.in_range {
                                colors.in_range.to_ratatui()
                            } else if cell.date == self.today {
                                colors.today.to_ratatui_with_modifier(Modifier::BOLD)
                            } else if weekday == 0 || weekday == 6 {
                                colors.weekend.to_ratatui()
                            } else {
                                colors.normal_text.to_ratatui()
                            };
                            if cell.day == self.day_cursor {
                                style = style.add_modifier(Modifier::REVERSED);
                            }
                            Cell::from(format!("{:>2}", cell.day)).style(style)
                        }
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        let title = format!("{} {} {}", icons::PREV, grid.month, icons::NEXT);
        Table::new(rows, [Constraint::Length(3); 7])
            .header(header)
            .column_spacing(1)
            .block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(title)
                    .title_style(colors.header.to_ratatui_with_modifier(Modifier::BOLD))
                    .title_alignment(Alignment::Center),
            )
    }

    fn calendar_footer(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let editing = self.model.editing_endpoint();
        let prompt = match editing {
            Endpoint::Start => "Select start date",
            Endpoint::End => "Select end date",
        };
        let toggle = |label: &str, endpoint: Endpoint| {
            let style = if editing == endpoint {
                colors.active_preset.to_ratatui()
            } else {
                colors.dimmed.to_ratatui()
            };
            Span::styled(format!(" {} ", label), style)
        };

        Paragraph::new(vec![
            Line::from(Span::styled(prompt, colors.help_text.to_ratatui())),
            Line::from(vec![toggle("1 Start", Endpoint::Start), Span::raw(" "), toggle("2 End", Endpoint::End)]),
        ])
        .alignment(Alignment::Center)
    }

    fn range_info_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let range: DateRange = self.model.range();
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Selected Range: ", colors.dimmed.to_ratatui()),
                Span::styled(range.label(), colors.normal_text.to_ratatui_with_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Duration: ", colors.dimmed.to_ratatui()),
                Span::styled(range.duration_label(), colors.accent.to_ratatui()),
            ]),
        ];

        if let Some(preset) = self.model.active_preset() {
            lines.push(Line::from(Span::styled(
                format!(" {} Active Preset: {} ", icons::CHECK, preset.label),
                colors.active_preset.to_ratatui(),
            )));
        }

        Paragraph::new(lines).block(self.block("Range", false))
    }

    fn time_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let time = self.model.time();
        let focused = self.focus == Focus::Time;
        let value_style = if focused {
            colors.endpoint.to_ratatui_with_modifier(Modifier::BOLD)
        } else {
            colors.normal_text.to_ratatui()
        };

        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("{} Select Time: ", icons::CLOCK), colors.dimmed.to_ratatui()),
                Span::styled(format!(" {} ", time.format(self.clock)), value_style),
            ]),
            Line::from(Span::styled(
                format!("Current: {}", time),
                colors.help_text.to_ratatui(),
            )),
        ])
        .block(self.block("Time Selection", focused))
    }

    fn options_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let focused = self.focus == Focus::Options;
        let checkbox = |on: bool| if on { "[x]" } else { "[ ]" };

        let lines: Vec<Line> = self
            .option_rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let text = match row {
                    OptionRow::IncludeTime => format!(
                        "{} Include time in selection",
                        checkbox(self.model.include_time())
                    ),
                    OptionRow::ShowPresets => {
                        format!("{} Show quick presets", checkbox(self.model.show_presets()))
                    }
                    OptionRow::Timezone => {
                        let tz: Timezone = self.model.timezone();
                        format!("Timezone: {} {} ({})", icons::PREV, tz.label(), tz.id())
                    }
                };
                let mut style = colors.normal_text.to_ratatui();
                if focused && i == self.option_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(Span::styled(text, style))
            })
            .collect();

        Paragraph::new(lines).block(self.block("Advanced Options", focused))
    }

    fn live_data_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let label = |text: &str| Line::from(Span::styled(text.to_string(), colors.dimmed.to_ratatui()));
        let value = |text: String| {
            Line::from(Span::styled(
                text,
                colors.normal_text.to_ratatui_with_modifier(Modifier::BOLD),
            ))
        };

        let data = self.live.as_ref().map(|live| live.borrow().clone());
        let lines = match data.as_ref().and_then(|d| d.range.map(|range| (d, range))) {
            None => vec![Line::from(Span::styled(
                "Interact with the date picker to see live data updates",
                colors.dimmed.to_ratatui_with_modifier(Modifier::ITALIC),
            ))],
            Some((data, range)) => {
                let mut lines = vec![
                    label("Start Date"),
                    value(range.start.format("%m/%d/%Y").to_string()),
                    label("End Date"),
                    value(range.end.format("%m/%d/%Y").to_string()),
                    label("Duration"),
                    value(DateRange::new(range.start, range.end).duration_label()),
                    label("Timezone"),
                    value(range.timezone.to_string()),
                    label("Include Time"),
                    value((if range.include_time { "Yes" } else { "No" }).to_string()),
                ];
                if range.include_time {
                    let time = data.time.unwrap_or(self.model.time());
                    lines.push(label("Selected Time"));
                    lines.push(value(time.to_string()));
                }
                lines
            }
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(self.block("Live Data", false))
    }

    fn help_widget(&self) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let mut lines = vec![Line::from(Span::styled(
            "Tab=Panel • s/e=Start/End calendar • ←→↑↓=Move • Enter=Pick • [ ]=Month • d/D=Type date • p=Presets • ?=Help • q=Quit",
            colors.help_text.to_ratatui(),
        ))];
        if self.show_help {
            lines.push(Line::from(Span::styled(
                "Calendar: 1/2 switch endpoint • t=This month • Time: ↑↓ hour, ←→ 15 min • Options: Space toggles, ←→ timezone",
                colors.dimmed.to_ratatui(),
            )));
        }
        Paragraph::new(lines).alignment(Alignment::Center)
    }

    /// Draw the whole screen into `frame`
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(60), Constraint::Length(34)])
            .split(area);

        let calendar_open = self.model.overlay().is_open();
        let mut constraints = Vec::new();
        if self.model.show_presets() {
            constraints.push(Constraint::Length(5));
        }
        constraints.push(Constraint::Length(3));
        if calendar_open {
            constraints.push(Constraint::Length(11));
        }
        constraints.push(Constraint::Length(if self.model.active_preset().is_some() { 5 } else { 4 }));
        if self.model.show_time_selector() {
            constraints.push(Constraint::Length(4));
        }
        constraints.push(Constraint::Length(self.option_rows().len() as u16 + 2));
        constraints.push(Constraint::Min(2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(columns[0]);
        let mut next = chunks.iter().copied();
        let mut take = || next.next().unwrap_or_default();

        if self.model.show_presets() {
            frame.render_widget(self.presets_widget(), take());
        }
        frame.render_widget(self.date_fields_widget(), take());
        if calendar_open {
            let calendar_area = take();
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Length(3)])
                .split(Self::centered(calendar_area, 28));
            frame.render_widget(self.calendar_widget(&self.model.calendar_grid()), parts[0]);
            frame.render_widget(self.calendar_footer(), parts[1]);
        }
        frame.render_widget(self.range_info_widget(), take());
        if self.model.show_time_selector() {
            frame.render_widget(self.time_widget(), take());
        }
        frame.render_widget(self.options_widget(), take());
        frame.render_widget(self.help_widget(), take());

        frame.render_widget(self.live_data_widget(), columns[1]);
    }

    /// Calculate horizontally centered area of at most `width` columns
    fn centered(available: Rect, width: u16) -> Rect {
        let width = available.width.min(width);
        Rect {
            x: available.x + (available.width - width) / 2,
            y: available.y,
            width,
            height: available.height,
        }
    }
}

/// Interactive picker bound to the real terminal.
pub struct PickerView<'a> {
    ui: PickerUi<'a>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl<'a> PickerView<'a> {
    pub fn new(ui: PickerUi<'a>) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self { ui, terminal })
    }

    /// Run the picker loop until the user exits
    pub fn run(&mut self) -> io::Result<PickerResult> {
        while !self.ui.should_exit() {
            let ui = &self.ui;
            self.terminal.draw(|frame| ui.render(frame))?;

            if poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.ui.handle_key_event(key);
                }
            }
        }

        self.cleanup()?;
        Ok(self.ui.result())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl<'a> Drop for PickerView<'a> {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarOverlay, PickerOptions};
    use crate::infrastructure::LiveDataHook;
    use ratatui::backend::TestBackend;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn model() -> RangeSelectionModel {
        let today = date(2024, 3, 13);
        let mut options = PickerOptions::starting(today);
        options.initial_start = date(2024, 3, 10);
        options.initial_end = date(2024, 3, 20);
        RangeSelectionModel::new(options, today)
    }

    fn screen_text(ui: &PickerUi) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|frame| ui.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_enter_on_preset_applies_it() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        assert_eq!(ui.focus(), Focus::Presets);

        ui.handle_key_event(press(KeyCode::Down));
        ui.handle_key_event(press(KeyCode::Enter));

        assert_eq!(ui.model().active_preset_id(), Some("yesterday"));
        assert_eq!(ui.model().range(), DateRange::day(date(2024, 3, 12)));
    }

    #[test]
    fn test_calendar_keys_pick_a_range() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::Tab));
        assert_eq!(ui.focus(), Focus::Calendar);

        ui.handle_key_event(press(KeyCode::Char('s')));
        assert_eq!(ui.model().overlay(), CalendarOverlay::PickingStart);
        assert_eq!(ui.day_cursor(), 10);

        ui.handle_key_event(press(KeyCode::Right));
        ui.handle_key_event(press(KeyCode::Enter));
        assert_eq!(ui.model().range().start, date(2024, 3, 11));
        assert_eq!(ui.model().overlay(), CalendarOverlay::PickingEnd);

        ui.handle_key_event(press(KeyCode::Down));
        ui.handle_key_event(press(KeyCode::Enter));
        assert_eq!(
            ui.model().range(),
            DateRange::new(date(2024, 3, 11), date(2024, 3, 18))
        );
        assert_eq!(ui.model().overlay(), CalendarOverlay::Closed);
    }

    #[test]
    fn test_day_cursor_crosses_month_boundary() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::Tab));
        ui.handle_key_event(press(KeyCode::Char('e')));
        assert_eq!(ui.day_cursor(), 20);

        for _ in 0..2 {
            ui.handle_key_event(press(KeyCode::Down));
        }
        assert_eq!(ui.model().calendar_cursor(), YearMonth::new(2024, 4).unwrap());
        assert_eq!(ui.day_cursor(), 3);
    }

    #[test]
    fn test_escape_closes_calendar_before_exiting() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::Tab));
        ui.handle_key_event(press(KeyCode::Char('s')));

        ui.handle_key_event(press(KeyCode::Esc));
        assert!(!ui.should_exit());
        assert!(!ui.model().overlay().is_open());

        ui.handle_key_event(press(KeyCode::Esc));
        assert!(ui.should_exit());
        assert!(matches!(ui.result(), PickerResult::Exited(_)));
    }

    #[test]
    fn test_ctrl_c_cancels() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(ui.should_exit());
        assert_eq!(ui.result(), PickerResult::Cancelled);
    }

    #[test]
    fn test_typed_date_input() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));

        ui.handle_key_event(press(KeyCode::Char('D')));
        assert_eq!(ui.input().unwrap().buffer, "2024-03-20");
        for _ in 0..2 {
            ui.handle_key_event(press(KeyCode::Backspace));
        }
        ui.handle_key_event(press(KeyCode::Char('0')));
        ui.handle_key_event(press(KeyCode::Char('5')));
        ui.handle_key_event(press(KeyCode::Enter));

        assert!(ui.input().is_none());
        assert_eq!(ui.model().range(), DateRange::day(date(2024, 3, 5)));
    }

    #[test]
    fn test_invalid_typed_date_is_dropped() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        let before = ui.model().range();

        ui.handle_key_event(press(KeyCode::Char('d')));
        for _ in 0..2 {
            ui.handle_key_event(press(KeyCode::Backspace));
        }
        ui.handle_key_event(press(KeyCode::Char('3')));
        ui.handle_key_event(press(KeyCode::Char('2')));
        ui.handle_key_event(press(KeyCode::Enter));

        assert_eq!(ui.model().range(), before);
    }

    #[test]
    fn test_hiding_presets_moves_focus() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::Char('p')));
        assert!(!ui.model().show_presets());
        assert_eq!(ui.focus(), Focus::Calendar);
    }

    #[test]
    fn test_options_toggle_and_cycle_timezone() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::BackTab));
        assert_eq!(ui.focus(), Focus::Options);

        ui.handle_key_event(press(KeyCode::Char(' ')));
        assert!(ui.model().include_time());

        ui.handle_key_event(press(KeyCode::Down));
        ui.handle_key_event(press(KeyCode::Down));
        ui.handle_key_event(press(KeyCode::Right));
        assert_eq!(ui.model().timezone(), Timezone::NewYork);
    }

    #[test]
    fn test_time_keys_adjust_clock() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::Tab));
        ui.handle_key_event(press(KeyCode::Tab));
        assert_eq!(ui.focus(), Focus::Time);

        ui.handle_key_event(press(KeyCode::Up));
        ui.handle_key_event(press(KeyCode::Left));
        assert_eq!(ui.model().time().to_string(), "12:45");
    }

    #[test]
    fn test_render_shows_range_and_live_data() {
        let (hook, live) = LiveDataHook::new();
        let mut model = model();
        model.register_hook(hook);
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13)).with_live_data(live);

        let text = screen_text(&ui);
        assert!(text.contains("Selected Range: Mar 10, 2024 - Mar 20, 2024"));
        assert!(text.contains("Duration: 11 days"));
        assert!(text.contains("Interact with the date picker"));

        ui.handle_key_event(press(KeyCode::Enter));
        let text = screen_text(&ui);
        assert!(text.contains("Active Preset: Today"));
        assert!(text.contains("03/13/2024"));
    }

    #[test]
    fn test_live_data_single_day_duration() {
        let (hook, live) = LiveDataHook::new();
        let mut model = model();
        model.register_hook(hook);
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13)).with_live_data(live);

        ui.handle_key_event(press(KeyCode::Enter));
        let text = screen_text(&ui);
        let live_column: Vec<String> = text
            .lines()
            .map(|line| line.chars().skip(86).collect::<String>())
            .collect();

        assert!(live_column.iter().any(|line| line.contains("1 day")));
        assert!(!text.contains("1 days"));
    }

    #[test]
    fn test_render_open_calendar() {
        let mut model = model();
        let mut ui = PickerUi::new(&mut model, date(2024, 3, 13));
        ui.handle_key_event(press(KeyCode::Tab));
        ui.handle_key_event(press(KeyCode::Char('s')));

        let text = screen_text(&ui);
        assert!(text.contains("March 2024"));
        assert!(text.contains("Select start date"));
        assert!(text.contains("Su"));
    }
}
