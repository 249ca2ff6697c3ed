//! Removal of dead interactive elements.

use crate::config::StageKind;
use crate::config::section::site::CleanupConfig;
use crate::dom::{Markup, ops};
use crate::pipeline::{PageContext, Pipe};

/// Removes every element matching any of its selectors.
pub struct ElementRemover {
    stage: StageKind,
    selectors: Vec<String>,
}

impl ElementRemover {
    /// The "add a comment" form and the "add yours" affordance.
    pub fn comment_form(config: &CleanupConfig) -> Self {
        Self {
            stage: StageKind::CommentForm,
            selectors: config.comment_form.clone(),
        }
    }

    /// CMS transient message banners.
    pub fn system_messages(config: &CleanupConfig) -> Self {
        Self {
            stage: StageKind::SystemMessages,
            selectors: config.messages.clone(),
        }
    }
}

impl<M: Markup> Pipe<M> for ElementRemover {
    fn name(&self) -> &'static str {
        self.stage.name()
    }

    fn apply(&self, doc: &mut M, _ctx: &PageContext<'_>) {
        for selector in &self.selectors {
            ops::remove(doc, selector);
        }
    }
}
