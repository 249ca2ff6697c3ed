//! Exact-value attribute rewriting.
//!
//! Used for links to hosts that no longer exist. Only whole attribute values
//! are compared; `http://old.example/` does not touch
//! `http://old.example/page`.

use crate::config::StageKind;
use crate::config::section::site::{AttributeRewrite, LinksConfig};
use crate::dom::{Markup, ops};
use crate::pipeline::{PageContext, Pipe};

/// Applies each rewrite rule in order.
pub struct LinkTransform {
    rules: Vec<AttributeRewrite>,
}

impl LinkTransform {
    pub fn new(config: &LinksConfig) -> Self {
        Self {
            rules: config.rewrite.clone(),
        }
    }
}

impl<M: Markup> Pipe<M> for LinkTransform {
    fn name(&self) -> &'static str {
        StageKind::LinkRewrite.name()
    }

    fn apply(&self, doc: &mut M, _ctx: &PageContext<'_>) {
        for rule in &self.rules {
            ops::set_attribute(doc, &rule.attribute, &rule.from, &rule.to);
        }
    }
}
