//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StageKind;
use crate::utils::date::DateTimeUtc;

/// Leafmend: post-process a mirrored CMS site into an archival copy
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: leafmend.toml)
    #[arg(short = 'C', long, global = true, default_value = "leafmend.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the progress line and per-page output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Copy the mirror, rewrite every page, patch stylesheets
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        paths: PathArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Open the home page in a browser when done
        #[arg(long)]
        open: bool,
    },

    /// Rewrite pages of an already copied tree in place
    #[command(visible_alias = "p")]
    Process {
        /// Directory to process (default: paths.output)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,

        /// Metadata directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        external: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Summarize loaded metadata, or show what a page would receive
    #[command(visible_alias = "i")]
    Inspect {
        /// Metadata directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        external: Option<PathBuf>,

        /// Document key (e.g. `article-name`) or page file name
        #[arg(short, long)]
        key: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Source, output and metadata directory overrides for `run`.
#[derive(clap::Args, Debug, Clone)]
pub struct PathArgs {
    /// Mirrored site snapshot
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Metadata directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub external: Option<PathBuf>,
}

/// Shared pipeline arguments for `run` and `process`.
#[derive(clap::Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Number of pages processed concurrently
    #[arg(short = 'j', long, value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Comma-separated stage list replacing `pipeline.stages`
    #[arg(long, value_enum, value_delimiter = ',')]
    pub stages: Option<Vec<StageKind>>,

    /// Fixed "updated" timestamp (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ)
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<DateTimeUtc>,
}

fn parse_timestamp(s: &str) -> Result<DateTimeUtc, String> {
    DateTimeUtc::parse(s).ok_or_else(|| format!("`{s}` is not a valid YYYY-MM-DD[THH:MM:SSZ] date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args() {
        let cli = Cli::parse_from([
            "leafmend",
            "run",
            "-j",
            "4",
            "--stages",
            "slogan,footer-notice",
            "--timestamp",
            "2024-06-15T14:30:45Z",
            "--open",
        ]);
        let Commands::Run {
            pipeline, open, ..
        } = cli.command
        else {
            panic!("expected run");
        };
        assert!(open);
        assert_eq!(pipeline.workers, Some(4));
        assert_eq!(
            pipeline.stages,
            Some(vec![StageKind::Slogan, StageKind::FooterNotice])
        );
        assert_eq!(
            pipeline.timestamp,
            Some(DateTimeUtc::new(2024, 6, 15, 14, 30, 45))
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["leafmend", "process", "out", "-C", "other.toml", "-q"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.quiet);
        let Commands::Process { dir, .. } = cli.command else {
            panic!("expected process");
        };
        assert_eq!(dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let result = Cli::try_parse_from(["leafmend", "run", "--timestamp", "2024-13-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_stage_rejected() {
        let result = Cli::try_parse_from(["leafmend", "run", "--stages", "minify"]);
        assert!(result.is_err());
    }
}
