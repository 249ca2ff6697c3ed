//! `[paths]`, `[metadata]` and `[open]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "source"       # mirrored snapshot (read-only)
//! output = "site"         # rewritten copy
//! external = "external"   # metadata files
//!
//! [metadata]
//! authors = "authors.json.base64"
//! comments = "hypercomments.json"
//! comments_css = "hypercomments.css"
//!
//! [open]
//! page = "index.htm"
//! ```
//!
//! Relative paths resolve against the directory holding `leafmend.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::path::normalize_path;

/// Input and output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Mirrored site snapshot copied at the start of a run.
    pub source: PathBuf,
    /// Directory the pipeline rewrites in place.
    pub output: PathBuf,
    /// Directory holding the metadata files.
    pub external: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: "source".into(),
            output: "site".into(),
            external: "external".into(),
        }
    }
}

impl PathsConfig {
    /// Resolve every path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.source = normalize_path(&root.join(&self.source));
        self.output = normalize_path(&root.join(&self.output));
        self.external = normalize_path(&root.join(&self.external));
    }
}

/// File names of the metadata inputs inside `paths.external`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataFilesConfig {
    /// Base64-encoded JSON list of authors.
    pub authors: PathBuf,
    /// JSON list of harvested comments.
    pub comments: PathBuf,
    /// Stylesheet injected into pages that receive comments.
    pub comments_css: PathBuf,
}

impl Default for MetadataFilesConfig {
    fn default() -> Self {
        Self {
            authors: "authors.json.base64".into(),
            comments: "hypercomments.json".into(),
            comments_css: "hypercomments.css".into(),
        }
    }
}

/// Page opened in the browser after `run --open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenConfig {
    /// Path relative to `paths.output`.
    pub page: PathBuf,
}

impl Default for OpenConfig {
    fn default() -> Self {
        Self {
            page: "index.htm".into(),
        }
    }
}
