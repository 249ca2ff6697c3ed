//! Header slogan replacement.

use crate::config::StageKind;
use crate::config::section::site::SloganConfig;
use crate::dom::{Markup, ops};
use crate::pipeline::{PageContext, Pipe};

/// Replaces the text of the slogan element.
pub struct SloganTransform {
    selector: String,
    text: String,
}

impl SloganTransform {
    pub fn new(config: &SloganConfig) -> Self {
        Self {
            selector: config.selector.clone(),
            text: config.text.clone(),
        }
    }
}

impl<M: Markup> Pipe<M> for SloganTransform {
    fn name(&self) -> &'static str {
        StageKind::Slogan.name()
    }

    fn apply(&self, doc: &mut M, _ctx: &PageContext<'_>) {
        ops::set_text(doc, &self.selector, &self.text);
    }
}
