//! `[[stylesheet.patch]]` section configuration.
//!
//! Literal find/replace edits applied to stylesheets of the output tree
//! after the pipeline has run.
//!
//! # Example
//!
//! ```toml
//! [[stylesheet.patch]]
//! path = "templates/site/css/style.css"
//! find = "padding-top:37.5%"
//! replace = "padding-top:0"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// One literal stylesheet edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetPatch {
    /// Stylesheet path relative to `paths.output`.
    pub path: PathBuf,
    pub find: String,
    pub replace: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetConfig {
    pub patch: Vec<StylesheetPatch>,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        const COVER_RULE: &str = ".joms-focus__cover:before, .joms-hcard__cover:before \
            {content:\"\";display:block;height:0;padding-top:";
        Self {
            patch: vec![StylesheetPatch {
                path: "components/com_community/templates/jomsocial/assets/css/style.css".into(),
                find: format!("{COVER_RULE}37.5%; }}"),
                replace: format!("{COVER_RULE}0; }}"),
            }],
        }
    }
}

impl StylesheetConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let patch = FieldPath::new("stylesheet.patch");
        for (i, entry) in self.patch.iter().enumerate() {
            if entry.find.is_empty() {
                diag.error(patch.index(i).join("find"), "search text is empty");
            }
            if entry.path.is_absolute() {
                diag.error(
                    patch.index(i).join("path"),
                    "must be relative to the output directory",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patch_targets_cover_padding() {
        let config = StylesheetConfig::default();
        let patch = &config.patch[0];
        assert!(patch.find.ends_with("padding-top:37.5%; }"));
        assert!(patch.replace.ends_with("padding-top:0; }"));
        assert!(patch.find.starts_with(".joms-focus__cover:before, .joms-hcard__cover:before {"));
    }

    #[test]
    fn test_validate_rejects_empty_find() {
        let config = StylesheetConfig {
            patch: vec![StylesheetPatch {
                path: "a.css".into(),
                find: String::new(),
                replace: "x".into(),
            }],
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.fields()[0], "stylesheet.patch[0].find");
    }
}
