//! Clickable teaser images.

use crate::config::StageKind;
use crate::config::section::site::ClickThroughConfig;
use crate::dom::Markup;
use crate::pipeline::{PageContext, Pipe};

/// Wraps the first image of each article teaser in a link to the article.
///
/// Teasers without a "read more" link or without an image are skipped, as
/// are images that already sit inside a link.
pub struct ClickThroughTransform {
    article: String,
    read_more: String,
    image: String,
}

impl ClickThroughTransform {
    pub fn new(config: &ClickThroughConfig) -> Self {
        Self {
            article: config.article.clone(),
            read_more: config.read_more.clone(),
            image: config.image.clone(),
        }
    }
}

impl<M: Markup> Pipe<M> for ClickThroughTransform {
    fn name(&self) -> &'static str {
        StageKind::ImageClickThrough.name()
    }

    fn apply(&self, doc: &mut M, _ctx: &PageContext<'_>) {
        for article in doc.select(&self.article) {
            let Some(link) = doc.select_one_in(&article, &self.read_more) else {
                continue;
            };
            let Some(href) = doc.attr(&link, "href") else {
                continue;
            };
            let Some(image) = doc.select_one_in(&article, &self.image) else {
                continue;
            };
            if doc.parent_tag(&image).as_deref() == Some("a") {
                continue;
            }
            doc.wrap(&image, "a", &[("href".to_owned(), href)]);
        }
    }
}
