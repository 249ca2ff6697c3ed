//! Recursive copy of the mirrored snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::debug;
use crate::utils::path::relative_to;

/// What a tree copy did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub dirs: usize,
    pub files: usize,
}

/// Copy every file under `source` into `output`, keeping the layout.
///
/// Existing files in `output` are overwritten; files that exist only in
/// `output` are left alone. Fails when `source` is missing or when `output`
/// lies inside `source`.
pub fn copy_tree(source: &Path, output: &Path) -> Result<CopyStats> {
    if !source.is_dir() {
        bail!("source directory `{}` does not exist", source.display());
    }
    if output.starts_with(source) {
        bail!(
            "output directory `{}` must not be inside source `{}`",
            output.display(),
            source.display()
        );
    }

    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(source).skip_hidden(false) {
        let entry = entry.with_context(|| format!("failed to walk `{}`", source.display()))?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            dirs.push(entry.path());
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }

    // Parents are walked before children, so one pass creates the tree.
    for dir in &dirs {
        let target = output.join(relative_to(dir, source));
        fs::create_dir_all(&target)
            .with_context(|| format!("failed to create `{}`", target.display()))?;
    }

    files.par_iter().try_for_each(|file| {
        let target = output.join(relative_to(file, source));
        fs::copy(file, &target)
            .map(|_| ())
            .with_context(|| format!("failed to copy `{}`", file.display()))
    })?;

    debug!("copy"; "{} dirs, {} files into {}", dirs.len(), files.len(), output.display());
    Ok(CopyStats {
        dirs: dirs.len(),
        files: files.len(),
    })
}
