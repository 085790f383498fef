use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Life calendar for the terminal.
#[derive(Parser)]
#[command(
    name = "lifegrid",
    version,
    about = "Render a life as a grid of days, weeks, or years"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Render the calendar grid with events overlaid.
    Render(RenderArgs),
    /// Show the seconds lived, or the seconds left.
    Seconds(SecondsArgs),
}

/// Arguments for the `render` subcommand.
#[derive(clap::Args)]
pub struct RenderArgs {
    /// Birth date in dd-MM-yyyy form.
    #[arg(short, long)]
    pub dob: String,

    /// Country code for the life-expectancy lookup (World Bank codes;
    /// "all" is the worldwide aggregate).
    #[arg(short, long, default_value = "all")]
    pub country: String,

    /// Grid unit: days, weeks, or years. Anything else falls back to weeks.
    #[arg(short, long, default_value = "weeks")]
    pub unit: String,

    /// Life event as date=label, e.g. "01-09-2010=Started school"
    /// (repeatable).
    #[arg(short, long = "event", value_name = "DATE=LABEL")]
    pub events: Vec<String>,

    /// Also write the grid as an SVG file at this path.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// SVG color theme: dark or light.
    #[arg(long, default_value = "dark")]
    pub theme: String,
}

/// Arguments for the `seconds` subcommand.
#[derive(clap::Args)]
pub struct SecondsArgs {
    /// Birth date in dd-MM-yyyy form.
    #[arg(short, long)]
    pub dob: String,

    /// Country code for the life-expectancy lookup.
    #[arg(short, long, default_value = "all")]
    pub country: String,

    /// Count down the seconds left instead of the seconds lived.
    #[arg(long)]
    pub remaining: bool,

    /// Keep the counter ticking once per second until interrupted.
    #[arg(long)]
    pub watch: bool,
}
