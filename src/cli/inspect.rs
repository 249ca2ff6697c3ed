//! `inspect` command: look at the metadata without touching any page.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::LeafmendConfig;
use crate::log;
use crate::metadata::{CommentRecord, MetadataStore, document_key};
use crate::utils::plural_count;

/// Keys listed in the overview.
const TOP_KEYS: usize = 10;

#[derive(Debug, Serialize)]
struct Overview<'a> {
    authors: usize,
    comments: usize,
    attachable: usize,
    unmatched: usize,
    top: Vec<(&'a str, usize)>,
}

#[derive(Debug, Serialize)]
struct PageComments<'a> {
    key: String,
    comments: Vec<AnnotatedComment<'a>>,
}

#[derive(Debug, Serialize)]
struct AnnotatedComment<'a> {
    #[serde(flatten)]
    comment: &'a CommentRecord,
    author_birth_info: Option<&'a str>,
}

/// Print the overview, or the comments one page would receive.
pub fn inspect_metadata(config: &LeafmendConfig, key: Option<&str>, json: bool) -> Result<()> {
    let store = MetadataStore::load(&config.metadata_paths())?;
    let output = match key {
        Some(key) => render_page(&store, key, json)?,
        None => render_overview(&store, json)?,
    };
    println!("{output}");
    Ok(())
}

/// Accept either a page file name (`42story.html`) or a bare key (`story`).
fn resolve_key(input: &str) -> String {
    document_key(Path::new(input)).unwrap_or_else(|| input.to_owned())
}

fn overview(store: &MetadataStore) -> Overview<'_> {
    let unmatched = store.unmatched().count();
    let mut top = store.keys_by_count();
    top.truncate(TOP_KEYS);
    Overview {
        authors: store.authors().len(),
        comments: store.comments().len(),
        attachable: store.comments().len() - unmatched,
        unmatched,
        top,
    }
}

fn render_overview(store: &MetadataStore, json: bool) -> Result<String> {
    let overview = overview(store);
    if json {
        return Ok(serde_json::to_string_pretty(&overview)?);
    }

    let mut out = format!(
        "{}\n{} ({} attachable, {} unmatched)",
        plural_count(overview.authors, "author"),
        plural_count(overview.comments, "comment"),
        overview.attachable,
        overview.unmatched
    );
    if !overview.top.is_empty() {
        out.push_str("\n\nmost commented pages:");
        for (key, count) in &overview.top {
            out.push_str(&format!("\n  {count:>4}  {key}"));
        }
    }
    Ok(out)
}

fn render_page(store: &MetadataStore, input: &str, json: bool) -> Result<String> {
    let key = resolve_key(input);
    let comments: Vec<_> = store
        .comments_for(&key)
        .into_iter()
        .map(|comment| AnnotatedComment {
            comment,
            author_birth_info: store.author(&comment.author_name),
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&PageComments { key, comments })?);
    }

    if comments.is_empty() {
        log!("inspect"; "no comments for `{}`", key);
        return Ok(String::new());
    }

    let mut out = format!("{}: {}", key, plural_count(comments.len(), "comment"));
    for entry in &comments {
        let c = entry.comment;
        out.push_str(&format!("\n\n[{}] {}", c.timestamp, c.author_name));
        if let Some(birth) = entry.author_birth_info {
            out.push_str(&format!(" ({birth})"));
        }
        if !c.title.is_empty() {
            out.push_str(&format!("\n  {}", c.title));
        }
        if let Some(quote) = c.quoted_parent_text.as_deref().filter(|q| !q.is_empty()) {
            out.push_str(&format!("\n  > {quote}"));
        }
        out.push_str(&format!("\n  {}", c.body_text));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AuthorRecord;

    fn comment(url: &str, name: &str, text: &str) -> CommentRecord {
        serde_json::from_value(serde_json::json!({
            "url": url,
            "name": name,
            "date": "2016-03-01T12:00:00",
            "text": text,
        }))
        .unwrap()
    }

    fn store() -> MetadataStore {
        MetadataStore::new(
            vec![AuthorRecord {
                name: "Olga".into(),
                birth_info: "1990, Казань".into(),
            }],
            vec![
                comment("https://redleaves.ru/proza/42story.html#hcm=1", "Olga", "first"),
                comment("https://redleaves.ru/proza/42story.html#hcm=2", "Ivan", "second"),
                comment("https://redleaves.ru/stikhi/7poem.html#hcm=3", "Ivan", "third"),
                comment("https://redleaves.ru/forum", "Ivan", "lost"),
            ],
            String::new(),
        )
    }

    #[test]
    fn test_resolve_key() {
        assert_eq!(resolve_key("42story.html"), "story");
        assert_eq!(resolve_key("story"), "story");
    }

    #[test]
    fn test_overview_counts() {
        let store = store();
        let overview = overview(&store);
        assert_eq!(overview.authors, 1);
        assert_eq!(overview.comments, 4);
        assert_eq!(overview.attachable, 3);
        assert_eq!(overview.unmatched, 1);
        assert_eq!(overview.top[0], ("story", 2));

        let text = render_overview(&store, false).unwrap();
        assert!(text.contains("4 comments (3 attachable, 1 unmatched)"));
    }

    #[test]
    fn test_page_text_includes_birth_info() {
        let text = render_page(&store(), "42story.html", false).unwrap();
        assert!(text.starts_with("story: 2 comments"));
        assert!(text.contains("Olga (1990, Казань)"));
        assert!(text.find("first").unwrap() < text.find("second").unwrap());
    }

    #[test]
    fn test_page_json() {
        let json = render_page(&store(), "poem", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["key"], "poem");
        assert_eq!(value["comments"][0]["text"], "third");
        assert!(value["comments"][0]["author_birth_info"].is_null());
    }

    #[test]
    fn test_unknown_page_is_empty() {
        assert_eq!(render_page(&store(), "missing", false).unwrap(), "");
    }
}
