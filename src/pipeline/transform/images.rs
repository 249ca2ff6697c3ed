//! Broken image replacement.

use crate::config::StageKind;
use crate::config::section::site::ImagesConfig;
use crate::dom::{Markup, ops};
use crate::pipeline::{PageContext, Pipe};
use crate::utils::html::render_attrs;

/// Replaces each image matched by a repair selector with a working `<img>`.
pub struct ImageRepairTransform {
    /// (selector, replacement markup)
    repairs: Vec<(String, String)>,
}

impl ImageRepairTransform {
    pub fn new(config: &ImagesConfig) -> Self {
        let repairs = config
            .repair
            .iter()
            .map(|entry| {
                let attrs = [
                    ("src".to_owned(), entry.src.clone()),
                    ("width".to_owned(), config.width.to_string()),
                    ("alt".to_owned(), config.alt.clone()),
                ];
                (entry.selector.clone(), format!("<img{}>", render_attrs(&attrs)))
            })
            .collect();
        Self { repairs }
    }
}

impl<M: Markup> Pipe<M> for ImageRepairTransform {
    fn name(&self) -> &'static str {
        StageKind::ImageRepair.name()
    }

    fn apply(&self, doc: &mut M, _ctx: &PageContext<'_>) {
        for (selector, replacement) in &self.repairs {
            ops::replace_with_fragment(doc, selector, replacement);
        }
    }
}
