//! Page rewriting pipeline.
//!
//! A [`Pipeline`] is an ordered list of pipes; every page goes through all of
//! them in order, and later pipes see the structure earlier ones produced.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  parse → slogan → home-categories → … → serialize   │
//! │             ↑ PageContext (path, metadata, time)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Pipes are stateless: they read their site settings and the shared
//! [`MetadataStore`], never mutate either, and keep nothing between pages.

pub mod transform;


use std::path::Path;

use crate::config::{SiteConfig, StageKind};
use crate::dom::Markup;
use crate::metadata::MetadataStore;
use crate::utils::date::DateTimeUtc;

pub use transform::{
    CategoryInjector, ClickThroughTransform, CommentInjector, ElementRemover, FooterInjector,
    ImageRepairTransform, LinkTransform, SloganTransform,
};

// =============================================================================
// Types
// =============================================================================

/// Everything a pipe may know about the page it is rewriting.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Absolute path of the page.
    pub path: &'a Path,
    /// Path relative to the run root.
    pub relative: &'a Path,
    pub metadata: &'a MetadataStore,
    /// Run timestamp, identical for every page of a run.
    pub generated_at: DateTimeUtc,
}

/// One named rewriting step.
pub trait Pipe<M: Markup>: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, doc: &mut M, ctx: &PageContext<'_>);
}

/// Ordered pipe list applied to every page.
pub struct Pipeline<M: Markup> {
    stages: Vec<Box<dyn Pipe<M>>>,
}

impl<M: Markup> Default for Pipeline<M> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<M: Markup + 'static> Pipeline<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pipe.
    pub fn pipe(mut self, stage: impl Pipe<M> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Build the pipeline for a site from its stage list.
    pub fn from_config(stages: &[StageKind], site: &SiteConfig) -> Self {
        stages
            .iter()
            .fold(Self::new(), |pipeline, stage| match stage {
                StageKind::Slogan => pipeline.pipe(SloganTransform::new(&site.slogan)),
                StageKind::HomeCategories => pipeline.pipe(CategoryInjector::new(&site.home)),
                StageKind::ImageRepair => pipeline.pipe(ImageRepairTransform::new(&site.images)),
                StageKind::CommentForm => pipeline.pipe(ElementRemover::comment_form(&site.cleanup)),
                StageKind::LinkRewrite => pipeline.pipe(LinkTransform::new(&site.links)),
                StageKind::SystemMessages => {
                    pipeline.pipe(ElementRemover::system_messages(&site.cleanup))
                }
                StageKind::ImageClickThrough => {
                    pipeline.pipe(ClickThroughTransform::new(&site.clickthrough))
                }
                StageKind::FooterNotice => pipeline.pipe(FooterInjector::new(&site.footer)),
                StageKind::ImportedComments => pipeline.pipe(CommentInjector::new(&site.comments)),
            })
    }
}

impl<M: Markup> Pipeline<M> {
    /// Run every pipe on `doc`, in order.
    pub fn apply_all(&self, doc: &mut M, ctx: &PageContext<'_>) {
        for stage in &self.stages {
            stage.apply(doc, ctx);
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
