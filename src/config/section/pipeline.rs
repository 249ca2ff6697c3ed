//! `[pipeline]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [pipeline]
//! workers = 6
//! stages = ["slogan", "comment-form", "imported-comments"]
//! ```
//!
//! `stages` is the ordered list of pipes every page goes through. Omitting it
//! selects the full catalog in its default order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Default worker pool size.
pub const DEFAULT_WORKERS: usize = 6;

/// Identifier of one pipe in the stage catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    /// Replace the header slogan text.
    Slogan,
    /// Add category links to the home page.
    HomeCategories,
    /// Swap broken images for working copies.
    ImageRepair,
    /// Drop the "add a comment" form.
    CommentForm,
    /// Rewrite attribute values (e.g. dead external links).
    LinkRewrite,
    /// Drop the CMS system message banner.
    SystemMessages,
    /// Make article teaser images link to the article.
    ImageClickThrough,
    /// Append the archival notice to the footer.
    FooterNotice,
    /// Attach harvested comments to their pages.
    ImportedComments,
}

impl StageKind {
    /// Full catalog in default order.
    pub const ALL: [StageKind; 9] = [
        Self::Slogan,
        Self::HomeCategories,
        Self::ImageRepair,
        Self::CommentForm,
        Self::LinkRewrite,
        Self::SystemMessages,
        Self::ImageClickThrough,
        Self::FooterNotice,
        Self::ImportedComments,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Slogan => "slogan",
            Self::HomeCategories => "home-categories",
            Self::ImageRepair => "image-repair",
            Self::CommentForm => "comment-form",
            Self::LinkRewrite => "link-rewrite",
            Self::SystemMessages => "system-messages",
            Self::ImageClickThrough => "image-click-through",
            Self::FooterNotice => "footer-notice",
            Self::ImportedComments => "imported-comments",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pipeline runner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of pages processed concurrently.
    pub workers: usize,

    /// Ordered stage list.
    pub stages: Vec<StageKind>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            stages: StageKind::ALL.to_vec(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.workers == 0 {
            diag.error_with_hint(
                FieldPath::new("pipeline.workers"),
                "must be at least 1",
                format!("the default is {DEFAULT_WORKERS}"),
            );
        }

        for (i, stage) in self.stages.iter().enumerate() {
            if self.stages[..i].contains(stage) {
                diag.error(
                    FieldPath::new("pipeline.stages").index(i),
                    format!("stage `{stage}` is listed more than once"),
                );
            }
        }
    }
}
