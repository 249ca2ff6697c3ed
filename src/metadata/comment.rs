//! Harvested comment records and the page keys they attach to.
//!
//! A comment's source URL looks like
//! `https://host/section/42article-name.html?x=1#hcm=7`; the part between the
//! numeric id and the extension (`article-name`) is its fragment. A page file
//! named `42article-name.html` has the same key, so the comment lands there.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::html::escape_attr;

static COMMENT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]+/(?:[^#?]*/)?\d+([^#?/]+?)(?:\.html?)?(?:\?[^#]*)?#hcm=\d+").unwrap()
});

static DOCUMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(.+)\.html?$").unwrap());

/// One comment as stored in the harvested comments file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(rename = "name")]
    pub author_name: String,
    #[serde(rename = "avatar", default)]
    pub avatar_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "date")]
    pub timestamp: String,
    #[serde(rename = "parent_text", default)]
    pub quoted_parent_text: Option<String>,
    #[serde(rename = "text")]
    pub body_text: String,

    /// Key of the page this comment belongs to (derived on load).
    #[serde(skip)]
    pub fragment: Option<String>,
}

impl CommentRecord {
    /// Derive `fragment` from `source_url`.
    pub fn index_fragment(&mut self) {
        self.fragment = url_fragment(&self.source_url);
    }

    /// Render the comment block inserted into the page's comment list.
    ///
    /// Text fields are inserted as markup; harvested bodies may carry
    /// formatting such as `<br>`.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(256 + self.body_text.len());
        html.push_str("<div class=\"hc-comment\">");
        html.push_str(&format!(
            "<img src=\"{}\" class=\"hc-avatar\">",
            escape_attr(&self.avatar_url)
        ));
        html.push_str("<div class=\"hc-content\">");
        html.push_str(&format!("<div class=\"hc-header\">{}</div>", self.title));
        html.push_str(&format!(
            "<div class=\"hc-subheader\"><h3 class=\"hc-author\">{}</h3><div class=\"hc-date\">{}</div></div>",
            self.author_name,
            self.timestamp.replace('T', " ")
        ));
        if let Some(quote) = self.quoted_parent_text.as_deref()
            && !quote.is_empty()
        {
            html.push_str(&format!("<p class=\"hc-quote\">{quote}</p>"));
        }
        html.push_str(&format!("<p class=\"hc-text\">{}</p>", self.body_text));
        html.push_str("</div></div>");
        html
    }
}

/// Extract the page key from a comment source URL.
pub fn url_fragment(url: &str) -> Option<String> {
    COMMENT_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Derive the key of a page from its file name.
///
/// `42article-name.html` → `article-name`; names without a leading numeric
/// id have no key.
pub fn document_key(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    DOCUMENT_NAME
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, parent: Option<&str>) -> CommentRecord {
        let mut c = CommentRecord {
            source_url: url.into(),
            author_name: "Olga".into(),
            avatar_url: "https://cdn.example/a.png?s=1&t=2".into(),
            title: "Re: article".into(),
            timestamp: "2016-03-01T12:00:00".into(),
            quoted_parent_text: parent.map(Into::into),
            body_text: "Great text".into(),
            fragment: None,
        };
        c.index_fragment();
        c
    }

    #[test]
    fn test_url_fragment() {
        assert_eq!(
            url_fragment("https://example.ru/section/42article-name.html?x=1#hcm=7").as_deref(),
            Some("article-name")
        );
        assert_eq!(
            url_fragment("http://redleaves.ru/proza/1203-osen.htm#hcm=1").as_deref(),
            Some("-osen")
        );
        assert_eq!(
            url_fragment("https://redleaves.ru/a/b/77story#hcm=3").as_deref(),
            Some("story")
        );
    }

    #[test]
    fn test_url_fragment_unmatched() {
        assert_eq!(url_fragment("https://example.ru/section/article.html#hcm=7"), None);
        assert_eq!(url_fragment("https://example.ru/section/42article.html"), None);
        assert_eq!(url_fragment("not a url"), None);
    }

    #[test]
    fn test_document_key() {
        assert_eq!(
            document_key(Path::new("/site/section/42article-name.html")).as_deref(),
            Some("article-name")
        );
        assert_eq!(document_key(Path::new("1203-osen.htm")).as_deref(), Some("-osen"));
        assert_eq!(document_key(Path::new("index.htm")), None);
        assert_eq!(document_key(Path::new("42story.css")), None);
    }

    #[test]
    fn test_key_and_fragment_agree() {
        let c = record("https://example.ru/section/42article-name.html?x=1#hcm=7", None);
        assert_eq!(c.fragment, document_key(Path::new("42article-name.html")));
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{"url":"https://example.ru/s/1abc.html#hcm=2","name":"Olga","avatar":"a.png",
            "title":"t","date":"2016-03-01T12:00:00","parent_text":null,"text":"hi"}"#;
        let c: CommentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(c.author_name, "Olga");
        assert_eq!(c.quoted_parent_text, None);
        assert_eq!(c.fragment, None);
    }

    #[test]
    fn test_to_html_with_quote() {
        let html = record("https://e.ru/1a.html#hcm=1", Some("earlier words")).to_html();
        assert!(html.starts_with("<div class=\"hc-comment\">"));
        assert!(html.contains("<h3 class=\"hc-author\">Olga</h3>"));
        assert!(html.contains("<div class=\"hc-date\">2016-03-01 12:00:00</div>"));
        assert!(html.contains("<p class=\"hc-quote\">earlier words</p>"));
        assert!(html.contains("<p class=\"hc-text\">Great text</p>"));
        assert!(html.contains("src=\"https://cdn.example/a.png?s=1&amp;t=2\""));
    }

    #[test]
    fn test_to_html_without_quote() {
        let html = record("https://e.ru/1a.html#hcm=1", None).to_html();
        assert!(!html.contains("hc-quote"));
    }
}
