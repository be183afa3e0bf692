use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cmd::Commands;
use crate::fields::WeekStart;

/// Terminal calendar with a to-do list for every day.
/// Running without a subcommand opens the interactive view.
#[derive(Parser, Debug)]
#[command(name = "caltodo", version, about = "Calendar with per-day to-do lists")]
pub struct Cli {
    /// Directory holding todos.json and the log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// First day of the week in calendar grids.
    #[arg(long, global = true, value_enum)]
    pub week_start: Option<WeekStart>,

    /// More log output. Repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
