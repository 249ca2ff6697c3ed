//! Document model and CSS selector access.
//!
//! Pipes never touch the parser directly: they go through [`Markup`], which
//! bundles selection with the handful of structural edits the pipeline
//! needs. [`HtmlDocument`] implements it on top of `kuchikiki`
//! (html5ever + servo selectors).
//!
//! Selection results are in document order. A selector that matches nothing,
//! or that does not parse, yields an empty result; user-supplied selectors are
//! checked when the configuration is loaded.

pub mod ops;

use html5ever::{LocalName, QualName, namespace_url, ns};
use kuchikiki::iter::NodeIterator;
use kuchikiki::traits::TendrilSink;
use kuchikiki::{Attribute, ExpandedName, NodeDataRef, NodeRef};

/// Selector and mutation capability over one parsed document.
pub trait Markup {
    /// Handle to an element. Cloning the handle does not clone the subtree.
    type Node: Clone;

    /// Parse a full document. Malformed markup is repaired best-effort.
    fn parse(html: &str) -> Self
    where
        Self: Sized;

    /// All elements matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<Self::Node>;

    /// First element matching `selector`.
    fn select_one(&self, selector: &str) -> Option<Self::Node> {
        self.select(selector).into_iter().next()
    }

    /// Descendants of `scope` matching `selector`, in document order.
    fn select_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn select_one_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node> {
        self.select_in(scope, selector).into_iter().next()
    }

    /// Every element whose `name` attribute equals `value` exactly.
    fn elements_with_attr(&self, name: &str, value: &str) -> Vec<Self::Node>;

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Tag name of the element's parent, if the parent is an element.
    fn parent_tag(&self, node: &Self::Node) -> Option<String>;

    /// The document's `<head>`.
    fn head(&self) -> Option<Self::Node>;

    fn set_attr(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Replace the element and its subtree with the parsed `html` fragment.
    fn replace_with_html(&mut self, node: &Self::Node, html: &str);

    /// Replace all children of the element with one text node.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Parse `html` and append the result as the element's last children.
    fn append_html(&mut self, node: &Self::Node, html: &str);

    /// Append a new `<tag attrs>` holding the parsed `inner_html` as the
    /// element's last child.
    fn append_wrapped(
        &mut self,
        node: &Self::Node,
        tag: &str,
        attrs: &[(String, String)],
        inner_html: &str,
    );

    /// Move the element into a new `<tag attrs>` placed where it stood.
    fn wrap(&mut self, node: &Self::Node, tag: &str, attrs: &[(String, String)]);

    /// Detach the element and its subtree from the document.
    fn detach(&mut self, node: &Self::Node);

    /// Serialize the whole document.
    fn to_html(&self) -> String;
}

// ============================================================================
// kuchikiki engine
// ============================================================================

/// A parsed HTML document backed by `kuchikiki`.
pub struct HtmlDocument {
    root: NodeRef,
}

impl HtmlDocument {
    /// Parse a fragment as if it were the content of `context` and return its
    /// top-level nodes. Without an element context the fragment is parsed as
    /// `<body>` content.
    fn parse_fragment(context: Option<&NodeRef>, html: &str) -> Vec<NodeRef> {
        let context = context
            .and_then(|node| node.as_element())
            .map(|element| element.name.clone())
            .unwrap_or_else(|| QualName::new(None, ns!(html), LocalName::from("body")));
        let fragment = kuchikiki::parse_fragment(context, Vec::new()).one(html);
        // The parser puts the fragment under a synthetic <html> root.
        fragment
            .first_child()
            .map(|root| root.children().collect())
            .unwrap_or_default()
    }

    /// A detached HTML element.
    fn new_element(tag: &str, attrs: &[(String, String)]) -> NodeRef {
        let attributes = attrs.iter().map(|(name, value)| {
            (
                ExpandedName::new(ns!(), name.as_str()),
                Attribute {
                    prefix: None,
                    value: value.clone(),
                },
            )
        });
        NodeRef::new_element(QualName::new(None, ns!(html), LocalName::from(tag)), attributes)
    }

    fn collect(matches: impl Iterator<Item = NodeDataRef<kuchikiki::ElementData>>) -> Vec<NodeRef> {
        matches.map(|m| m.as_node().clone()).collect()
    }
}

impl Markup for HtmlDocument {
    type Node = NodeRef;

    fn parse(html: &str) -> Self {
        Self {
            root: kuchikiki::parse_html().one(html),
        }
    }

    fn select(&self, selector: &str) -> Vec<NodeRef> {
        match self.root.select(selector) {
            Ok(matches) => Self::collect(matches),
            Err(()) => Vec::new(),
        }
    }

    fn select_in(&self, scope: &NodeRef, selector: &str) -> Vec<NodeRef> {
        match scope.descendants().select(selector) {
            Ok(matches) => Self::collect(matches),
            Err(()) => Vec::new(),
        }
    }

    fn elements_with_attr(&self, name: &str, value: &str) -> Vec<NodeRef> {
        self.root
            .inclusive_descendants()
            .elements()
            .filter(|el| el.attributes.borrow().get(name) == Some(value))
            .map(|el| el.as_node().clone())
            .collect()
    }

    fn attr(&self, node: &NodeRef, name: &str) -> Option<String> {
        let element = node.as_element()?;
        let attributes = element.attributes.borrow();
        attributes.get(name).map(str::to_owned)
    }

    fn parent_tag(&self, node: &NodeRef) -> Option<String> {
        let parent = node.parent()?;
        let element = parent.as_element()?;
        Some(element.name.local.to_string())
    }

    fn head(&self) -> Option<NodeRef> {
        self.select_one("head")
    }

    fn set_attr(&mut self, node: &NodeRef, name: &str, value: &str) {
        if let Some(element) = node.as_element() {
            element
                .attributes
                .borrow_mut()
                .insert(name, value.to_owned());
        }
    }

    fn replace_with_html(&mut self, node: &NodeRef, html: &str) {
        for child in Self::parse_fragment(node.parent().as_ref(), html) {
            node.insert_before(child);
        }
        node.detach();
    }

    fn set_text(&mut self, node: &NodeRef, text: &str) {
        let children: Vec<_> = node.children().collect();
        for child in children {
            child.detach();
        }
        node.append(NodeRef::new_text(text));
    }

    fn append_html(&mut self, node: &NodeRef, html: &str) {
        for child in Self::parse_fragment(Some(node), html) {
            node.append(child);
        }
    }

    fn append_wrapped(
        &mut self,
        node: &NodeRef,
        tag: &str,
        attrs: &[(String, String)],
        inner_html: &str,
    ) {
        let wrapper = Self::new_element(tag, attrs);
        for child in Self::parse_fragment(Some(&wrapper), inner_html) {
            wrapper.append(child);
        }
        node.append(wrapper);
    }

    fn wrap(&mut self, node: &NodeRef, tag: &str, attrs: &[(String, String)]) {
        let wrapper = Self::new_element(tag, attrs);
        node.insert_before(wrapper.clone());
        wrapper.append(node.clone());
    }

    fn detach(&mut self, node: &NodeRef) {
        node.detach();
    }

    fn to_html(&self) -> String {
        self.root.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html><html><head><title>t</title></head><body>
<div class="a" id="first"><p class="x">one</p><p class="x">two</p></div>
<div class="b"><a href="/p.html"><img src="i.png"></a><span data-k="v">s</span></div>
</body></html>"#;

    #[test]
    fn test_select_document_order() {
        let doc = HtmlDocument::parse(PAGE);
        let found = doc.select("p.x");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text_contents(), "one");
        assert_eq!(found[1].text_contents(), "two");
        assert!(doc.select(".missing").is_empty());
        assert!(doc.select("[[").is_empty());
        assert!(doc.select_one("#first").is_some());
    }

    #[test]
    fn test_select_in_scope() {
        let doc = HtmlDocument::parse(PAGE);
        let scope = doc.select_one(".b").unwrap();
        assert!(doc.select_in(&scope, "p").is_empty());
        let img = doc.select_one_in(&scope, "img").unwrap();
        assert_eq!(doc.attr(&img, "src").as_deref(), Some("i.png"));
        assert_eq!(doc.parent_tag(&img).as_deref(), Some("a"));
    }

    #[test]
    fn test_elements_with_attr_exact() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.elements_with_attr("data-k", "v").len(), 1);
        assert!(doc.elements_with_attr("data-k", "V").is_empty());
    }

    #[test]
    fn test_replace_and_wrap() {
        let mut doc = HtmlDocument::parse(PAGE);
        let first = doc.select_one("#first").unwrap();
        doc.replace_with_html(&first, "<section id=\"new\">n</section>");
        assert!(doc.select_one("#first").is_none());
        assert!(doc.select_one("body > section#new").is_some());

        let span = doc.select_one("span").unwrap();
        doc.wrap(&span, "em", &[("class".into(), "w".into())]);
        assert!(doc.select_one("em.w > span[data-k]").is_some());
    }

    #[test]
    fn test_set_text_and_append() {
        let mut doc = HtmlDocument::parse(PAGE);
        let div = doc.select_one("#first").unwrap();
        doc.set_text(&div, "<b>plain</b>");
        assert!(doc.select("#first p").is_empty());
        assert!(doc.to_html().contains("&lt;b&gt;plain&lt;/b&gt;"));

        doc.append_html(&div, "<i>x</i> tail");
        assert!(doc.select_one("#first > i").is_some());
        assert!(div.text_contents().ends_with("x tail"));
    }

    #[test]
    fn test_fragments_parse_in_element_context() {
        let mut doc = HtmlDocument::parse(
            "<html><body><select id=\"s\"></select><table><tbody><tr id=\"r\"></tr></tbody></table></body></html>",
        );
        let select = doc.select_one("#s").unwrap();
        doc.append_wrapped(&select, "optgroup", &[("label".into(), "g".into())], "<option>1</option>");
        assert!(doc.select_one("#s > optgroup[label=\"g\"] > option").is_some());

        let row = doc.select_one("#r").unwrap();
        doc.append_html(&row, "<td>cell</td>");
        assert_eq!(doc.select_one("#r > td").unwrap().text_contents(), "cell");

        let cell = doc.select_one("#r > td").unwrap();
        doc.replace_with_html(&cell, "<td class=\"new\">n</td>");
        assert!(doc.select_one("#r > td.new").is_some());
    }

    #[test]
    fn test_serialize_keeps_doctype_and_utf8() {
        let doc = HtmlDocument::parse("<!DOCTYPE html><html><body><p>Проза</p></body></html>");
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>Проза</p>"));
        assert!(doc.head().is_some());
    }
}
