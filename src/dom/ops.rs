//! Selector-driven mutation operations.
//!
//! Each operation returns how many elements it touched; zero means the
//! selector matched nothing and the document is unchanged.

use super::Markup;

/// Replace every match with the parsed `html` fragment.
pub fn replace_with_fragment<M: Markup>(doc: &mut M, selector: &str, html: &str) -> usize {
    let targets = doc.select(selector);
    for node in &targets {
        doc.replace_with_html(node, html);
    }
    targets.len()
}

/// Replace the children of every match with a single text node.
pub fn set_text<M: Markup>(doc: &mut M, selector: &str, text: &str) -> usize {
    let targets = doc.select(selector);
    for node in &targets {
        doc.set_text(node, text);
    }
    targets.len()
}

/// Append `<wrapper_tag attrs>inner_html</wrapper_tag>` as the last child of
/// every match.
pub fn append_wrapped_child<M: Markup>(
    doc: &mut M,
    selector: &str,
    inner_html: &str,
    wrapper_tag: &str,
    wrapper_attrs: &[(String, String)],
) -> usize {
    let targets = doc.select(selector);
    for node in &targets {
        doc.append_wrapped(node, wrapper_tag, wrapper_attrs, inner_html);
    }
    targets.len()
}

/// Detach every match together with its subtree.
pub fn remove<M: Markup>(doc: &mut M, selector: &str) -> usize {
    let targets = doc.select(selector);
    for node in &targets {
        doc.detach(node);
    }
    targets.len()
}

/// Set `name` to `new` on every element whose `name` equals `old` exactly.
pub fn set_attribute<M: Markup>(doc: &mut M, name: &str, old: &str, new: &str) -> usize {
    let targets = doc.elements_with_attr(name, old);
    for node in &targets {
        doc.set_attr(node, name, new);
    }
    targets.len()
}

/// Append `<style type="text/css">` with `css` to `<head>`.
///
/// Returns 0 when the document has no head.
pub fn inject_style<M: Markup>(doc: &mut M, css: &str) -> usize {
    let Some(head) = doc.head() else {
        return 0;
    };
    doc.append_html(&head, &format!("<style type=\"text/css\">{css}</style>"));
    1
}
