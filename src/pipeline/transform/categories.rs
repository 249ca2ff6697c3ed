//! Category navigation on the home page.

use std::path::Path;

use crate::config::StageKind;
use crate::config::section::site::HomeConfig;
use crate::debug;
use crate::dom::{Markup, ops};
use crate::pipeline::{PageContext, Pipe};

/// Appends the navigation fragment to the home page's content container.
///
/// Every other page passes through untouched.
pub struct CategoryInjector {
    page: String,
    container: String,
    fragment: String,
    wrapper: String,
}

impl CategoryInjector {
    pub fn new(config: &HomeConfig) -> Self {
        Self {
            page: config.page.clone(),
            container: config.container.clone(),
            fragment: config.fragment.clone(),
            wrapper: config.wrapper.clone(),
        }
    }

    fn is_home(&self, relative: &Path) -> bool {
        relative == Path::new(&self.page)
    }
}

impl<M: Markup> Pipe<M> for CategoryInjector {
    fn name(&self) -> &'static str {
        StageKind::HomeCategories.name()
    }

    fn apply(&self, doc: &mut M, ctx: &PageContext<'_>) {
        if !self.is_home(ctx.relative) {
            return;
        }
        let added = ops::append_wrapped_child(doc, &self.container, &self.fragment, &self.wrapper, &[]);
        if added == 0 {
            debug!("pipeline"; "home page has no `{}` container", self.container);
        }
    }
}
