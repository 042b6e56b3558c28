//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Activity reporting for tracked time.
///
/// Filters tracked activities by a calendar-aligned period and renders
/// per-day and per-project summaries or a flat CSV export.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the JSON data file, overriding the configured one.
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize activities of a period by day and by project.
    Report {
        /// Period kind: day, week, month, quarter, year or custom.
        #[arg(short = 't', long)]
        timespan: Option<String>,

        /// Period value, e.g. 2022-09-05 (day), 2022-36 (week), 2022-09
        /// (month), 2022-3 (quarter), 2022 (year) or
        /// 2022-09-01_2022-09-15 (custom). Defaults to the current period.
        #[arg(short = 'v', long)]
        value: Option<String>,

        /// Output the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export the activities of a period as CSV to stdout.
    Export {
        /// Period kind: day, week, month, quarter, year or custom.
        #[arg(short = 't', long)]
        timespan: Option<String>,

        /// Period value; same formats as for report.
        #[arg(short = 'v', long)]
        value: Option<String>,

        /// Column to sort by: start or project.
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction: asc or desc.
        #[arg(long)]
        sort_order: Option<String>,
    },
}
