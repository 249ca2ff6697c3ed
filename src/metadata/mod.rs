//! Side metadata merged into pages.
//!
//! Three files live in the external directory:
//!
//! | File | Content |
//! |------|---------|
//! | `authors.json.base64` | base64-encoded JSON list of [`AuthorRecord`] |
//! | `hypercomments.json` | JSON list of [`CommentRecord`] |
//! | `hypercomments.css` | stylesheet injected next to imported comments |
//!
//! The store is built once before the pipeline starts and only read
//! afterwards, so workers share it through a plain `&MetadataStore`.

mod author;
mod comment;

pub use author::{AuthorRecord, decode_authors};
pub use comment::{CommentRecord, document_key};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::debug;

/// Errors raised while loading the metadata files.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata file `{0}` does not exist")]
    MissingFile(PathBuf),

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("malformed metadata in `{path}`: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Absolute locations of the metadata inputs.
#[derive(Debug, Clone)]
pub struct MetadataPaths {
    pub authors: PathBuf,
    pub comments: PathBuf,
    pub comments_css: PathBuf,
}

/// Authors, comments and the comment stylesheet, indexed by page key.
#[derive(Debug, Default)]
pub struct MetadataStore {
    authors: Vec<AuthorRecord>,
    comments: Vec<CommentRecord>,
    comments_css: String,
    /// Page key → indices into `comments`, in file order.
    by_fragment: FxHashMap<String, Vec<usize>>,
}

impl MetadataStore {
    /// Build a store from already decoded records.
    pub fn new(
        authors: Vec<AuthorRecord>,
        mut comments: Vec<CommentRecord>,
        comments_css: String,
    ) -> Self {
        let mut by_fragment: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (i, comment) in comments.iter_mut().enumerate() {
            comment.index_fragment();
            match &comment.fragment {
                Some(fragment) => by_fragment.entry(fragment.clone()).or_default().push(i),
                None => debug!("metadata"; "unmatched comment url: {}", comment.source_url),
            }
        }

        Self {
            authors,
            comments,
            comments_css,
            by_fragment,
        }
    }

    /// Read and decode all three metadata files.
    pub fn load(paths: &MetadataPaths) -> Result<Self, MetadataError> {
        let comments_css = String::from_utf8(read_required(&paths.comments_css)?).map_err(|e| {
            MetadataError::Malformed {
                path: paths.comments_css.clone(),
                reason: e.to_string(),
            }
        })?;

        let authors = decode_authors(&read_required(&paths.authors)?).map_err(|reason| {
            MetadataError::Malformed {
                path: paths.authors.clone(),
                reason,
            }
        })?;

        let comments: Vec<CommentRecord> =
            serde_json::from_slice(&read_required(&paths.comments)?).map_err(|e| {
                MetadataError::Malformed {
                    path: paths.comments.clone(),
                    reason: e.to_string(),
                }
            })?;

        Ok(Self::new(authors, comments, comments_css))
    }

    /// Comments attached to the page with `key`, in file order.
    pub fn comments_for(&self, key: &str) -> Vec<&CommentRecord> {
        self.by_fragment
            .get(key)
            .map(|indices| indices.iter().map(|&i| &self.comments[i]).collect())
            .unwrap_or_default()
    }

    /// Birth info shown for an author.
    pub fn author(&self, name: &str) -> Option<&str> {
        self.authors
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.birth_info.as_str())
    }

    pub fn authors(&self) -> &[AuthorRecord] {
        &self.authors
    }

    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    pub fn comments_css(&self) -> &str {
        &self.comments_css
    }

    /// Comments whose source URL yields no page key.
    pub fn unmatched(&self) -> impl Iterator<Item = &CommentRecord> {
        self.comments.iter().filter(|c| c.fragment.is_none())
    }

    /// Page keys with their comment counts, most commented first.
    pub fn keys_by_count(&self) -> Vec<(&str, usize)> {
        let mut keys: Vec<_> = self
            .by_fragment
            .iter()
            .map(|(key, indices)| (key.as_str(), indices.len()))
            .collect();
        keys.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        keys
    }
}

fn read_required(path: &Path) -> Result<Vec<u8>, MetadataError> {
    fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => MetadataError::MissingFile(path.to_path_buf()),
        _ => MetadataError::Io(path.to_path_buf(), err),
    })
}
