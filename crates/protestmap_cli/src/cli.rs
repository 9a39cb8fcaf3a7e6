use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "protestmap",
    version,
    about = "Protest map dataset builder and view query tool"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "JSON config file (columns, dataset path, render options)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "trace|debug|info|warn|error|off")]
    pub log_level: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Absolute directory for rolling log files (default: stderr)"
    )]
    pub log_dir: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a sheet snapshot into the dataset asset.
    Build {
        #[arg(long, help = "JSON array of sheet rows")]
        rows: PathBuf,
        #[arg(long, help = "Dataset asset to write (default from config)")]
        out: Option<PathBuf>,
    },
    /// Evaluate a map view against the dataset asset.
    Query {
        #[arg(long, help = "Dataset asset to read (default from config)")]
        data: Option<PathBuf>,
        #[arg(long, help = "URL query string, e.g. current=12&from=2022-04-01")]
        url: Option<String>,
        #[arg(long, help = "Selected point id")]
        current: Option<String>,
        #[arg(long, value_parser = parse_date, help = "First visible day (YYYY-MM-DD)")]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date, help = "Last visible day (YYYY-MM-DD)")]
        to: Option<NaiveDate>,
        #[arg(long, default_value_t = false, help = "Embed footage links in the popup")]
        embeds: bool,
    },
    /// Print the core library version.
    Version,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    protestmap_core::query::state::parse_param_date(value)
        .ok_or_else(|| format!("expected YYYY-MM-DD, got `{value}`"))
}
