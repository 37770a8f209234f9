use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "agecalc")]
#[command(about = "How old are you, down to the second, and when is your next birthday")]
pub struct CliArgs {
    /// Birth date as YYYY-MM-DD, taken as local midnight
    pub birth_date: String,

    /// Evaluate at this RFC 3339 instant instead of the wall clock
    #[arg(long)]
    pub now: Option<DateTime<FixedOffset>>,

    /// Path to an agecalc.toml config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Refresh the output once per second
    #[arg(long)]
    pub watch: bool,

    /// Stop watching after this many refreshes
    #[arg(long, requires = "watch")]
    pub ticks: Option<u64>,

    /// Write dark and light SVG cards into this directory
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
