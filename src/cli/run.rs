//! `run` and `process` commands.
//!
//! `run` is the full archive update:
//!
//! ```text
//! copy source → output ─► load metadata ─► rewrite pages ─► patch CSS ─► open
//! ```
//!
//! `process` is the middle part alone, over an existing tree.

use std::path::Path;

use anyhow::{Result, bail};

use crate::asset::{copy_tree, patch_stylesheets};
use crate::config::LeafmendConfig;
use crate::dom::HtmlDocument;
use crate::metadata::MetadataStore;
use crate::pipeline::Pipeline;
use crate::runner::{self, RunOptions, RunReport};
use crate::utils::date::DateTimeUtc;
use crate::utils::platform::open_in_browser;
use crate::utils::plural_count;
use crate::{debug, log};

/// Options shared by `run` and `process` that are not part of the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunFlags {
    /// Fixed timestamp; `None` takes the current time once.
    pub timestamp: Option<DateTimeUtc>,
    pub quiet: bool,
    pub open: bool,
}

/// Full update: copy, rewrite, patch, optionally open.
pub fn run_site(config: &LeafmendConfig, flags: RunFlags) -> Result<()> {
    let paths = &config.paths;

    log!("copy"; "{} → {}", paths.source.display(), paths.output.display());
    let stats = copy_tree(&paths.source, &paths.output)?;
    log!(
        "copy";
        "copied {} in {}",
        plural_count(stats.files, "file"),
        plural_count(stats.dirs, "dir")
    );

    let report = process_tree(config, &paths.output, flags)?;

    let patched = patch_stylesheets(&paths.output, &config.stylesheet.patch)?;
    if patched > 0 {
        log!("css"; "patched {}", plural_count(patched, "stylesheet"));
    }

    let summary = summarize(&report);

    if flags.open {
        let page = config.open_page();
        log!("open"; "{}", page.display());
        if let Err(e) = open_in_browser(&page) {
            log!("warning"; "{:#}", e);
        }
    }

    summary
}

/// Rewrite every page under `root` and print the summary.
pub fn process_site(config: &LeafmendConfig, root: &Path, flags: RunFlags) -> Result<()> {
    let report = process_tree(config, root, flags)?;
    summarize(&report)
}

/// Load metadata and run the configured pipeline over `root`.
fn process_tree(config: &LeafmendConfig, root: &Path, flags: RunFlags) -> Result<RunReport> {
    let store = MetadataStore::load(&config.metadata_paths())?;
    log!(
        "metadata";
        "{}, {} ({} unmatched)",
        plural_count(store.authors().len(), "author"),
        plural_count(store.comments().len(), "comment"),
        store.unmatched().count()
    );

    let pipeline = Pipeline::<HtmlDocument>::from_config(&config.pipeline.stages, &config.site);
    debug!("pipeline"; "stages: {}", pipeline.names().join(", "));

    let options = RunOptions {
        workers: config.pipeline.workers,
        quiet: flags.quiet,
        generated_at: flags.timestamp.unwrap_or_else(DateTimeUtc::now),
    };
    debug!("pipeline"; "updated at {}", options.generated_at.to_rfc3339());
    Ok(runner::run(root, &store, &pipeline, &options)?)
}

/// Print the outcome; any failed page makes the command fail.
fn summarize(report: &RunReport) -> Result<()> {
    if report.is_success() {
        log!("done"; "rewrote {}", plural_count(report.succeeded, "page"));
        return Ok(());
    }

    log!(
        "failed";
        "{} of {} could not be rewritten:",
        report.failed(),
        plural_count(report.processed, "page")
    );
    for failure in &report.failures {
        eprintln!("- {}: {}", failure.path.display(), failure.reason);
    }
    bail!("{} failed", plural_count(report.failed(), "page"))
}
