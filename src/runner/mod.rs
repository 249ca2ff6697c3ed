//! Parallel page runner.
//!
//! Discovers every `.html`/`.htm` page under a root, then runs the pipeline on
//! each page in a fixed-size rayon pool:
//!
//! ```text
//! read → parse → pipe₁ … pipeₙ → serialize → atomic overwrite
//! ```
//!
//! Each page is its own task with its own document. A task that fails, by
//! error or by panic, is recorded in the [`RunReport`] and never stops its
//! siblings.

mod write;

#[cfg(test)]
mod tests;

pub use write::write_atomic;

use std::any::Any;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;
use thiserror::Error;

use crate::dom::Markup;
use crate::logger::ProgressLine;
use crate::metadata::MetadataStore;
use crate::pipeline::{PageContext, Pipeline};
use crate::utils::date::DateTimeUtc;
use crate::utils::path::{is_html_document, normalize_path, relative_to};
use crate::utils::plural_count;
use crate::{debug, log};

// =============================================================================
// Types
// =============================================================================

/// Errors that stop a run before any page is touched.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("directory `{0}` does not exist")]
    MissingRoot(PathBuf),

    #[error("failed to start worker pool")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Why one page could not be rewritten.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("not valid UTF-8")]
    NotUtf8,

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    #[error("panicked: {0}")]
    Panicked(String),
}

/// Per-run settings.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub workers: usize,
    /// Hide the progress line and per-page failure logs.
    pub quiet: bool,
    /// Timestamp shared by every page of the run.
    pub generated_at: DateTimeUtc,
}

/// A page that failed.
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregate outcome of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub processed: usize,
    pub succeeded: usize,
    /// Failures in discovery order.
    pub failures: Vec<DocumentFailure>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// All HTML pages under `root` as absolute paths, sorted.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(normalize_path(root))
        .skip_hidden(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_html_document(p))
        .collect();
    files.sort_unstable();
    files
}

// =============================================================================
// Run
// =============================================================================

/// Rewrite every page under `root` in place.
pub fn run<M: Markup + 'static>(
    root: &Path,
    store: &MetadataStore,
    pipeline: &Pipeline<M>,
    options: &RunOptions,
) -> Result<RunReport, RunError> {
    if !root.is_dir() {
        return Err(RunError::MissingRoot(root.to_path_buf()));
    }
    // Page paths are absolute, so relative paths must be taken against the same form
    let root = &normalize_path(root);

    let files = discover(root);
    debug!(
        "pipeline";
        "{} under {}, {} stages, {} workers",
        plural_count(files.len(), "page"),
        root.display(),
        pipeline.stage_count(),
        options.workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.max(1))
        .build()?;
    let progress = (!options.quiet).then(|| ProgressLine::new("pipeline", "pages", files.len()));

    let failures: Vec<DocumentFailure> = pool.install(|| {
        files
            .par_iter()
            .filter_map(|path| {
                let result = guarded(|| {
                    process_document(path, root, store, pipeline, options.generated_at)
                });
                if let Some(p) = &progress {
                    p.inc(result.is_ok());
                }
                let err = result.err()?;
                if !options.quiet {
                    log!("failed"; "{}: {}", relative_to(path, root).display(), err);
                }
                Some(DocumentFailure {
                    path: path.clone(),
                    reason: err.to_string(),
                })
            })
            .collect()
    });

    if let Some(p) = progress {
        p.finish();
    }

    Ok(RunReport {
        processed: files.len(),
        succeeded: files.len() - failures.len(),
        failures,
    })
}

/// Read, rewrite and store one page.
fn process_document<M: Markup + 'static>(
    path: &Path,
    root: &Path,
    store: &MetadataStore,
    pipeline: &Pipeline<M>,
    generated_at: DateTimeUtc,
) -> Result<(), DocumentError> {
    let bytes = fs::read(path).map_err(DocumentError::Read)?;
    let html = String::from_utf8(bytes).map_err(|_| DocumentError::NotUtf8)?;

    let mut doc = M::parse(&html);
    let ctx = PageContext {
        path,
        relative: relative_to(path, root),
        metadata: store,
        generated_at,
    };
    pipeline.apply_all(&mut doc, &ctx);

    write_atomic(path, doc.to_html().as_bytes()).map_err(DocumentError::Write)
}

/// Run a task, turning a panic into a `DocumentError`.
fn guarded(task: impl FnOnce() -> Result<(), DocumentError>) -> Result<(), DocumentError> {
    panic::catch_unwind(AssertUnwindSafe(task))
        .unwrap_or_else(|payload| Err(DocumentError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
