use crate::application::{PickerApp, PickerSettings};
use crate::domain::{DateRange, PresetSet, YearMonth};
use chrono::{Duration, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rangepicker")]
#[command(about = "A terminal date range picker with presets, time and timezone selection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive picker (default)
    Pick(PickerArgs),
    /// List a preset catalog
    Presets {
        /// Reference date for the presets (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Which catalog to list
        #[arg(short, long, default_value = "default")]
        set: PresetSet,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a month grid with a range highlighted
    Grid {
        /// Month to show (YYYY-MM format, defaults to the month of the range start)
        #[arg(short, long, value_parser = parse_year_month)]
        month: Option<YearMonth>,
        /// Range start (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        start: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD format, defaults to a week after the start)
        #[arg(short, long)]
        end: Option<NaiveDate>,
    },
    /// Print the inclusive number of days between two dates
    Duration { start: NaiveDate, end: NaiveDate },
}

#[derive(Args, Default)]
pub struct PickerArgs {
    /// Initial start date (YYYY-MM-DD format, defaults to today)
    #[arg(short, long)]
    pub start: Option<NaiveDate>,
    /// Initial end date (YYYY-MM-DD format, defaults to a week after the start)
    #[arg(short, long)]
    pub end: Option<NaiveDate>,
    /// Hide the time selector
    #[arg(long)]
    pub no_time: bool,
    /// Start with the preset list collapsed
    #[arg(long)]
    pub hide_presets: bool,
    /// Disable timezone selection (always UTC)
    #[arg(long)]
    pub no_timezone: bool,
    /// Preset catalog to offer
    #[arg(long, default_value = "default")]
    pub presets: PresetSet,
    /// Append every change notification to this file as JSON lines
    #[arg(long)]
    pub events: Option<PathBuf>,
}

impl From<PickerArgs> for PickerSettings {
    fn from(args: PickerArgs) -> Self {
        PickerSettings {
            start: args.start,
            end: args.end,
            show_time_selector: !args.no_time,
            show_presets: !args.hide_presets,
            enable_timezone: !args.no_timezone,
            preset_set: args.presets,
            events_path: args.events,
        }
    }
}

fn parse_year_month(input: &str) -> Result<YearMonth, String> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{input}'"))?;
    let year: i32 = year.parse().map_err(|_| format!("invalid year '{year}'"))?;
    let month: u32 = month.parse().map_err(|_| format!("invalid month '{month}'"))?;
    YearMonth::new(year, month).ok_or_else(|| format!("month out of range: {month}"))
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let app = PickerApp::new();
        log::info!("rangepicker starting, today is {}", app.today());

        match cli.command {
            Some(Commands::Pick(args)) => {
                Self::pick(&app, args.into())?;
            }
            Some(Commands::Presets { date, set, json }) => {
                let now = date.unwrap_or_else(|| app.today());
                println!("{}", app.presets_text(set, now, json)?);
            }
            Some(Commands::Grid { month, start, end }) => {
                let start = start.unwrap_or_else(|| app.today());
                let end = end.unwrap_or(start + Duration::days(7));
                println!("{}", app.grid_text(month, DateRange::new(start, end)));
            }
            Some(Commands::Duration { start, end }) => {
                println!("{}", DateRange::new(start, end).duration_days());
            }
            None => {
                // Default: open the picker with every option enabled
                Self::pick(&app, PickerArgs::default().into())?;
            }
        }

        Ok(())
    }

    fn pick(app: &PickerApp, settings: PickerSettings) -> anyhow::Result<()> {
        match app.run_picker(&settings)? {
            Some(change) => println!("{}", serde_json::to_string_pretty(&change)?),
            None => log::info!("Picker cancelled"),
        }
        Ok(())
    }
}
