use super::icons;
use super::theme::{ColorPair, Theme};
use crate::domain::{CalendarGrid, DateRange, PresetCatalog, WEEKDAY_HEADERS};
use chrono::NaiveDate;

/// Renders picker data as plain or ANSI-coloured text for non-interactive output.
pub struct TextRenderer {
    theme: Option<Theme>,
}

impl TextRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }

    pub fn plain() -> Self {
        Self { theme: None }
    }

    fn paint(&self, text: &str, pick: impl Fn(&Theme) -> &ColorPair, bold: bool) -> String {
        match &self.theme {
            Some(theme) if bold => pick(theme).colorize_bold(text),
            Some(theme) => pick(theme).colorize(text),
            None => text.to_string(),
        }
    }

    /// Month grid; endpoints are bracketed in plain mode so the output stays readable.
    pub fn render_grid(&self, grid: &CalendarGrid, today: NaiveDate) -> String {
        let mut out = String::new();
        let title = format!("{:^27}", grid.month.to_string());
        out.push_str(&self.paint(&title, |t| &t.colors.header, true));
        out.push('\n');

        let header: Vec<String> = WEEKDAY_HEADERS.iter().map(|d| format!("{:>3}", d)).collect();
        out.push_str(&self.paint(&header.join(" "), |t| &t.colors.header, false));
        out.push('\n');

        for week in grid.weeks() {
            let cells: Vec<String> = week
                .iter()
                .map(|slot| match slot {
                    None => "   ".to_string(),
                    Some(cell) if cell.is_endpoint => match self.theme {
                        Some(_) => self.paint(&format!("{:>3}", cell.day), |t| &t.colors.endpoint, true),
                        None => format!("[{:>2}", cell.day),
                    },
                    Some(cell) if cell.in_range => match self.theme {
                        Some(_) => self.paint(&format!("{:>3}", cell.day), |t| &t.colors.in_range, false),
                        None => format!("*{:>2}", cell.day),
                    },
                    Some(cell) if cell.date == today => {
                        self.paint(&format!("{:>3}", cell.day), |t| &t.colors.today, true)
                    }
                    Some(cell) => format!("{:>3}", cell.day),
                })
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out
    }

    pub fn render_presets(&self, catalog: &PresetCatalog) -> String {
        let mut out = String::new();
        for preset in catalog.iter() {
            let line = format!(
                "{} {:<14} {:<12} {}",
                icons::preset_icon(&preset.id),
                preset.label,
                preset.id,
                preset.range().label()
            );
            out.push_str(&self.paint(&line, |t| &t.colors.normal_text, false));
            out.push('\n');
        }
        out
    }

    pub fn render_range(&self, range: &DateRange) -> String {
        format!(
            "{}\n{}\n",
            self.paint(
                &format!("Selected Range: {}", range.label()),
                |t| &t.colors.normal_text,
                true
            ),
            self.paint(
                &format!("Duration: {}", range.duration_label()),
                |t| &t.colors.accent,
                false
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearMonth;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_grid_marks_range() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 3));
        let grid = CalendarGrid::build(YearMonth::new(2024, 5).unwrap(), &range);
        let text = TextRenderer::plain().render_grid(&grid, date(2024, 6, 1));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "May 2024");
        assert_eq!(lines[1], " Su  Mo  Tu  We  Th  Fr  Sa");
        assert_eq!(lines[2], "            [ 1 * 2 [ 3   4");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_presets_listing() {
        let catalog = PresetCatalog::defaults(date(2024, 3, 13));
        let text = TextRenderer::plain().render_presets(&catalog);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("◉ Today"));
        assert!(first.contains("today"));
        assert!(first.ends_with("Mar 13, 2024 - Mar 13, 2024"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_range_summary() {
        let text = TextRenderer::plain().render_range(&DateRange::day(date(2024, 3, 13)));
        assert_eq!(text, "Selected Range: Mar 13, 2024 - Mar 13, 2024\nDuration: 1 day\n");
    }
}
