//! Literal stylesheet patches on the output tree.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::section::StylesheetPatch;
use crate::runner::write_atomic;
use crate::{debug, log};

/// Apply each patch to its stylesheet under `output`.
///
/// Returns how many stylesheets changed. A missing stylesheet is reported
/// and skipped; a stylesheet without the search text is left as is.
pub fn patch_stylesheets(output: &Path, patches: &[StylesheetPatch]) -> Result<usize> {
    let mut changed = 0;
    for patch in patches {
        let path = output.join(&patch.path);
        if !path.is_file() {
            log!("warning"; "stylesheet {} not found, skipping patch", patch.path.display());
            continue;
        }

        let css = fs::read_to_string(&path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        if !css.contains(&patch.find) {
            debug!("css"; "{}: pattern not found", patch.path.display());
            continue;
        }

        let patched = css.replace(&patch.find, &patch.replace);
        write_atomic(&path, patched.as_bytes())
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        debug!("css"; "patched {}", patch.path.display());
        changed += 1;
    }
    Ok(changed)
}
