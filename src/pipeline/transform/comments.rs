//! Harvested comments attached to their pages.
//!
//! The page key comes from the file name (`42article-name.html` →
//! `article-name`); every comment indexed under that key is rendered into the
//! page's comment list, in file order. When at least one comment lands, the
//! "no comments yet" placeholder goes away and the comment stylesheet is
//! injected into `<head>`. A list that already holds rendered comments is
//! left alone, so processing an output tree again does not duplicate them.

use crate::config::StageKind;
use crate::config::section::site::CommentsConfig;
use crate::debug;
use crate::dom::{Markup, ops};
use crate::metadata::document_key;

/// Class of the root element of a rendered comment.
const RENDERED: &str = ".hc-comment";
use crate::pipeline::{PageContext, Pipe};

pub struct CommentInjector {
    list: String,
    empty: String,
    wrapper: String,
}

impl CommentInjector {
    pub fn new(config: &CommentsConfig) -> Self {
        Self {
            list: config.list.clone(),
            empty: config.empty.clone(),
            wrapper: config.wrapper.clone(),
        }
    }
}

impl<M: Markup> Pipe<M> for CommentInjector {
    fn name(&self) -> &'static str {
        StageKind::ImportedComments.name()
    }

    fn apply(&self, doc: &mut M, ctx: &PageContext<'_>) {
        let Some(key) = document_key(ctx.path) else {
            return;
        };
        let comments = ctx.metadata.comments_for(&key);
        if comments.is_empty() {
            return;
        }
        let Some(list) = doc.select_one(&self.list) else {
            debug!("pipeline"; "{}: no comment list for {} comments", ctx.relative.display(), comments.len());
            return;
        };
        if doc.select_one_in(&list, RENDERED).is_some() {
            debug!("pipeline"; "{}: comments already attached", ctx.relative.display());
            return;
        }

        for comment in &comments {
            ops::append_wrapped_child(doc, &self.list, &comment.to_html(), &self.wrapper, &[]);
        }
        ops::remove(doc, &self.empty);
        ops::inject_style(doc, ctx.metadata.comments_css());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::metadata::{CommentRecord, MetadataStore};
    use crate::pipeline::transform::test_context;
    use std::path::Path;

    const PAGE: &str = r#"<html><head><title>t</title></head><body>
<ul class="kmt-list"><li class="kmt-empty-comment">No comments yet</li></ul>
</body></html>"#;

    fn comment(url: &str, name: &str, text: &str) -> CommentRecord {
        CommentRecord {
            source_url: url.into(),
            author_name: name.into(),
            avatar_url: "a.png".into(),
            title: "Re".into(),
            timestamp: "2016-03-01T12:00:00".into(),
            quoted_parent_text: None,
            body_text: text.into(),
            fragment: None,
        }
    }

    fn store() -> MetadataStore {
        MetadataStore::new(
            Vec::new(),
            vec![
                comment("https://example.ru/section/42article-name.html?x=1#hcm=7", "Olga", "first"),
                comment("https://example.ru/section/43other.html#hcm=8", "Ivan", "elsewhere"),
                comment("https://example.ru/section/42article-name.html#hcm=9", "Anna", "second"),
            ],
            ".hc-comment{margin:0}".into(),
        )
    }

    #[test]
    fn test_matching_comments_attached() {
        let store = store();
        let ctx = test_context(Path::new("section/42article-name.html"), &store);
        let mut doc = HtmlDocument::parse(PAGE);
        CommentInjector::new(&CommentsConfig::default()).apply(&mut doc, &ctx);

        let items = doc.select(".kmt-list > li .hc-text");
        let texts: Vec<_> = items.iter().map(|n| n.text_contents()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(doc.select(".kmt-empty-comment").is_empty());
        assert_eq!(doc.select(".hc-author").len(), 2);
        assert!(doc.to_html().contains("2016-03-01 12:00:00"));

        let style = doc.select_one("head > style").unwrap();
        assert_eq!(style.text_contents(), ".hc-comment{margin:0}");
    }

    #[test]
    fn test_second_pass_adds_nothing() {
        let store = store();
        let ctx = test_context(Path::new("section/42article-name.html"), &store);
        let injector = CommentInjector::new(&CommentsConfig::default());
        let mut doc = HtmlDocument::parse(PAGE);
        injector.apply(&mut doc, &ctx);
        let once = doc.to_html();

        let mut doc = HtmlDocument::parse(&once);
        injector.apply(&mut doc, &ctx);
        assert_eq!(doc.select(".hc-comment").len(), 2);
        assert_eq!(doc.select("head > style").len(), 1);
        assert_eq!(doc.to_html(), once);
    }

    #[test]
    fn test_no_matching_comments_leaves_page() {
        let store = store();
        for page in ["section/44quiet.html", "index.htm"] {
            let ctx = test_context(Path::new(page), &store);
            let mut doc = HtmlDocument::parse(PAGE);
            let before = doc.to_html();
            CommentInjector::new(&CommentsConfig::default()).apply(&mut doc, &ctx);
            assert_eq!(doc.to_html(), before);
            assert!(doc.select_one(".kmt-empty-comment").is_some());
            assert!(doc.select("style").is_empty());
        }
    }

    #[test]
    fn test_missing_list_is_noop() {
        let store = store();
        let ctx = test_context(Path::new("42article-name.html"), &store);
        let mut doc = HtmlDocument::parse("<html><head></head><body><p>x</p></body></html>");
        let before = doc.to_html();
        CommentInjector::new(&CommentsConfig::default()).apply(&mut doc, &ctx);
        assert_eq!(doc.to_html(), before);
    }
}
