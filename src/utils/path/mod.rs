//! Filesystem path utilities.
//!
//! - [`fs`]: normalization and the HTML document filter used by discovery

pub mod fs;

pub use fs::{is_html_document, normalize_path, relative_to};
