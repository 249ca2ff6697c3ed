//! Archival notice in the footer.

use crate::config::StageKind;
use crate::config::section::site::FooterConfig;
use crate::dom::{Markup, ops};
use crate::pipeline::{PageContext, Pipe};

/// Placeholder replaced with the run timestamp, in UTC.
const UPDATED: &str = "{updated}";

/// Drops the hidden copyright line and appends the archival notice.
pub struct FooterInjector {
    hidden: String,
    slot: String,
    notice: String,
    wrapper: String,
}

impl FooterInjector {
    pub fn new(config: &FooterConfig) -> Self {
        Self {
            hidden: config.hidden.clone(),
            slot: config.slot.clone(),
            notice: config.notice.clone(),
            wrapper: config.wrapper.clone(),
        }
    }
}

impl<M: Markup> Pipe<M> for FooterInjector {
    fn name(&self) -> &'static str {
        StageKind::FooterNotice.name()
    }

    fn apply(&self, doc: &mut M, ctx: &PageContext<'_>) {
        ops::remove(doc, &self.hidden);
        let updated = format!("{} UTC", ctx.generated_at.to_display());
        let notice = self.notice.replace(UPDATED, &updated);
        ops::append_wrapped_child(doc, &self.slot, &notice, &self.wrapper, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::metadata::MetadataStore;
    use crate::pipeline::transform::test_context;
    use std::path::Path;

    #[test]
    fn test_notice_appended_with_timestamp() {
        let store = MetadataStore::default();
        let ctx = test_context(Path::new("index.htm"), &store);
        let mut doc = HtmlDocument::parse(
            r#"<html><body><div class="copyright"><small style="display:none">hidden</small>
<div class="custom"><p>© site</p></div></div></body></html>"#,
        );
        FooterInjector::new(&FooterConfig::default()).apply(&mut doc, &ctx);

        assert!(doc.select("[style=\"display:none\"]").is_empty());
        let notice = doc.select_one(".copyright .custom > div:last-child > p").unwrap();
        let text = notice.text_contents();
        assert!(text.starts_with("Архивная версия"));
        assert!(text.contains("Обновлено: 2024-06-15 14:30:45 UTC."));
        assert!(doc.select_one(".custom > div a[target=\"_blank\"]").is_some());
    }

    #[test]
    fn test_missing_slot_is_noop() {
        let store = MetadataStore::default();
        let ctx = test_context(Path::new("index.htm"), &store);
        let mut doc = HtmlDocument::parse("<html><body><footer>f</footer></body></html>");
        let before = doc.to_html();
        FooterInjector::new(&FooterConfig::default()).apply(&mut doc, &ctx);
        assert_eq!(doc.to_html(), before);
    }
}
