//! `[site.*]` section configuration.
//!
//! Selector constants and replacement texts for each pipe. The defaults
//! describe the redleaves.ru Joomla mirror; another site variant overrides
//! only the tables it needs.
//!
//! # Example
//!
//! ```toml
//! [site.slogan]
//! selector = ".site-slogan"
//! text = "Archived copy"
//!
//! [[site.images.repair]]
//! selector = '[alt="cover.jpg"]'
//! src = "https://example.org/cover.jpg"
//!
//! [[site.links.rewrite]]
//! attribute = "href"
//! from = "http://old.example.org/"
//! to = "https://example.org/"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::html::is_valid_tag_name;

/// All per-pipe site settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub slogan: SloganConfig,
    pub home: HomeConfig,
    pub images: ImagesConfig,
    pub cleanup: CleanupConfig,
    pub links: LinksConfig,
    pub clickthrough: ClickThroughConfig,
    pub footer: FooterConfig,
    pub comments: CommentsConfig,
}

/// `[site.slogan]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SloganConfig {
    pub selector: String,
    pub text: String,
}

impl Default for SloganConfig {
    fn default() -> Self {
        Self {
            selector: ".site-slogan".into(),
            text: "Литературный проект, объединяющий молодых авторов. Архивная версия".into(),
        }
    }
}

/// `[site.home]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Home page path relative to the output root.
    pub page: String,
    /// Main content container the fragment is appended to.
    pub container: String,
    /// Navigation fragment appended to the home page.
    pub fragment: String,
    /// Tag wrapping the fragment.
    pub wrapper: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            page: "index.htm".into(),
            container: ".t3-content".into(),
            fragment: concat!(
                "<div><h3>Ещё больше произведений в разделе ",
                "<a href=\"proza.html\">Проза</a> и <a href=\"stikhi.htm\">Стихи</a></h3></div>"
            )
            .into(),
            wrapper: "div".into(),
        }
    }
}

/// One broken image and its working replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRepair {
    pub selector: String,
    pub src: String,
}

/// `[site.images]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Width given to replacement images.
    pub width: u32,
    /// Fallback alt text of replacement images.
    pub alt: String,
    pub repair: Vec<ImageRepair>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            width: 496,
            alt: "image for article".into(),
            repair: vec![ImageRepair {
                selector: "[alt=\"97465406_plusBh1rgU9NG3H3fC9JhhFVKTDrA7sq4D2oWLA_0187f.jpg\"]"
                    .into(),
                src: concat!(
                    "https://raw.githubusercontent.com/redleaves-ru/redleaves-ru.github.io/",
                    "main/site/images/tony/97465406_plusbh1rgu9ng3h3fc9jhhfvktdra7sq4d2owla_0187f.jpg"
                )
                .into(),
            }],
        }
    }
}

/// `[site.cleanup]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Comment form and "add yours" affordances.
    pub comment_form: Vec<String>,
    /// CMS system message containers.
    pub messages: Vec<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            comment_form: vec![".commentForm".into(), ".kmt-addyours".into()],
            messages: vec!["#system-message-container".into()],
        }
    }
}

/// One exact-value attribute rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRewrite {
    pub attribute: String,
    pub from: String,
    pub to: String,
}

/// `[site.links]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub rewrite: Vec<AttributeRewrite>,
}

/// `[site.clickthrough]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickThroughConfig {
    /// Article-like containers.
    pub article: String,
    /// "Read more" link inside a container.
    pub read_more: String,
    /// Image inside a container.
    pub image: String,
}

impl Default for ClickThroughConfig {
    fn default() -> Self {
        Self {
            article: "article".into(),
            read_more: ".readmore a".into(),
            image: "img".into(),
        }
    }
}

/// `[site.footer]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Hidden copyright element removed before the notice is added.
    pub hidden: String,
    /// Slot the notice is appended to.
    pub slot: String,
    /// Notice markup; `{updated}` is replaced with the run timestamp.
    pub notice: String,
    pub wrapper: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            hidden: ".copyright [style=\"display:none\"]".into(),
            slot: ".copyright .custom".into(),
            notice: concat!(
                "<p>Архивная версия (<a href=\"https://github.com/redleaves-ru/",
                "redleaves-ru.github.io/edit/main/README.ru.md\" target=\"_blank\">",
                "что это значит?</a>).\nОбновлено: {updated}.</p>"
            )
            .into(),
            wrapper: "div".into(),
        }
    }
}

/// `[site.comments]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Comment list container.
    pub list: String,
    /// "No comments yet" placeholder.
    pub empty: String,
    /// Tag wrapping each rendered comment.
    pub wrapper: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            list: ".kmt-list".into(),
            empty: ".kmt-empty-comment".into(),
            wrapper: "li".into(),
        }
    }
}

impl SiteConfig {
    /// Check every selector and wrapper tag.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut selector = |field: FieldPath, value: &str| {
            if kuchikiki::Selectors::compile(value).is_err() {
                diag.error_with_hint(
                    field,
                    format!("invalid CSS selector `{value}`"),
                    "selectors follow CSS syntax, e.g. `.class`, `#id`, `[attr=\"v\"]`",
                );
            }
        };

        selector("site.slogan.selector".into(), &self.slogan.selector);
        selector("site.home.container".into(), &self.home.container);
        let repair = FieldPath::new("site.images.repair");
        for (i, entry) in self.images.repair.iter().enumerate() {
            selector(repair.index(i).join("selector"), &entry.selector);
        }
        let comment_form = FieldPath::new("site.cleanup.comment_form");
        for (i, value) in self.cleanup.comment_form.iter().enumerate() {
            selector(comment_form.index(i), value);
        }
        let messages = FieldPath::new("site.cleanup.messages");
        for (i, value) in self.cleanup.messages.iter().enumerate() {
            selector(messages.index(i), value);
        }
        selector("site.clickthrough.article".into(), &self.clickthrough.article);
        selector("site.clickthrough.read_more".into(), &self.clickthrough.read_more);
        selector("site.clickthrough.image".into(), &self.clickthrough.image);
        selector("site.footer.hidden".into(), &self.footer.hidden);
        selector("site.footer.slot".into(), &self.footer.slot);
        selector("site.comments.list".into(), &self.comments.list);
        selector("site.comments.empty".into(), &self.comments.empty);

        for (field, tag) in [
            ("site.home.wrapper", &self.home.wrapper),
            ("site.footer.wrapper", &self.footer.wrapper),
            ("site.comments.wrapper", &self.comments.wrapper),
        ] {
            if !is_valid_tag_name(tag) {
                diag.error(field.into(), format!("`{tag}` is not a valid tag name"));
            }
        }

        let rewrite = FieldPath::new("site.links.rewrite");
        for (i, rule) in self.links.rewrite.iter().enumerate() {
            if rule.attribute.is_empty() {
                diag.error(rewrite.index(i).join("attribute"), "attribute name is empty");
            }
        }

        if self.images.width == 0 {
            diag.error("site.images.width".into(), "must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults_validate() {
        let site = SiteConfig::default();
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert!(diag.fields().is_empty(), "{:?}", diag.fields());
    }

    #[test]
    fn test_site_override_keeps_other_defaults() {
        let config = test_parse_config(
            "[site.slogan]\ntext = \"Archived\"\n\n[[site.links.rewrite]]\nattribute = \"href\"\nfrom = \"a\"\nto = \"b\"",
        );
        assert_eq!(config.site.slogan.text, "Archived");
        assert_eq!(config.site.slogan.selector, ".site-slogan");
        assert_eq!(config.site.links.rewrite.len(), 1);
        assert_eq!(config.site.comments.list, ".kmt-list");
    }

    #[test]
    fn test_site_invalid_selector_and_tag() {
        let mut site = SiteConfig::default();
        site.comments.list = "[[broken".into();
        site.footer.wrapper = "div class".into();
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert_eq!(diag.fields(), vec!["site.comments.list", "site.footer.wrapper"]);
    }

    #[test]
    fn test_site_invalid_repair_selector_path() {
        let mut site = SiteConfig::default();
        site.images.repair.push(ImageRepair {
            selector: "img[".into(),
            src: "x.png".into(),
        });
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert_eq!(diag.fields(), vec!["site.images.repair[1].selector"]);
    }
}
