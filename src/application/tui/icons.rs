/// Glyph shown next to a preset button, looked up by preset id at render time.
pub fn preset_icon(id: &str) -> &'static str {
    match id {
        "lastquarter" | "nextquarter" => "▤",
        "today" | "yesterday" => "◉",
        "thisweek" | "thismonth" | "thisyear" => "▦",
        _ => "▣",
    }
}

pub const CHECK: &str = "✓";
pub const CLOCK: &str = "◷";
pub const PREV: &str = "‹";
pub const NEXT: &str = "›";
