//! `protestmap` entry point.
//!
//! # Responsibility
//! - Parse arguments, initialize logging and config, dispatch commands.

mod cli;
mod commands;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use protestmap_core::{default_log_level, init_logging, load_config, TrackerConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    let config = match &cli.config {
        Some(path) => {
            load_config(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => TrackerConfig::default(),
    };
    log::debug!(
        "event=cli_start module=cli dataset_path={}",
        config.dataset_path.display()
    );

    match cli.command {
        Commands::Build { rows, out } => commands::build(&config, rows, out, cli.json),
        Commands::Query {
            data,
            url,
            current,
            from,
            to,
            embeds,
        } => commands::query(
            &config,
            commands::QueryArgs {
                data,
                url,
                current,
                from,
                to,
                embeds,
            },
            cli.json,
        ),
        Commands::Version => commands::version(cli.json),
    }
}
