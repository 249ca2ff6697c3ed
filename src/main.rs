//! Leafmend - turns a mirrored CMS snapshot into a browsable static archive.

mod asset;
mod cli;
mod config;
mod dom;
mod logger;
mod metadata;
mod pipeline;
mod runner;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{
    Cli, Commands,
    run::{RunFlags, process_site, run_site},
};
use config::LeafmendConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = LeafmendConfig::load(&cli)?;

    match &cli.command {
        Commands::Run { pipeline, open, .. } => run_site(
            &config,
            RunFlags {
                timestamp: pipeline.timestamp,
                quiet: cli.quiet,
                open: *open,
            },
        ),
        // `process [DIR]` lands in `paths.output` during config load
        Commands::Process { pipeline, .. } => process_site(
            &config,
            &config.paths.output,
            RunFlags {
                timestamp: pipeline.timestamp,
                quiet: cli.quiet,
                open: false,
            },
        ),
        Commands::Inspect { key, json, .. } => {
            cli::inspect::inspect_metadata(&config, key.as_deref(), *json)
        }
    }
}
