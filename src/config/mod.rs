//! Run configuration from `leafmend.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths], [metadata], [open]
//! │   ├── pipeline   # [pipeline]
//! │   ├── site       # [site.*]
//! │   └── stylesheet # [[stylesheet.patch]]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # LeafmendConfig (this file)
//! ```
//!
//! The config file is optional: without it every section falls back to the
//! defaults for the redleaves.ru mirror. CLI flags override file values.

pub mod section;
pub mod types;

pub use section::{
    MetadataFilesConfig, OpenConfig, PathsConfig, PipelineConfig, SiteConfig, StageKind,
    StylesheetConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, PipelineArgs},
    debug, log,
    metadata::MetadataPaths,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing leafmend.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafmendConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub paths: PathsConfig,
    pub metadata: MetadataFilesConfig,
    pub pipeline: PipelineConfig,
    pub site: SiteConfig,
    pub stylesheet: StylesheetConfig,
    pub open: OpenConfig,
}

impl LeafmendConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// A missing config file is not an error: defaults are used and the
    /// current directory becomes the project root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = normalize_path(&cwd.join(&cli.config));

        let mut config = if config_path.is_file() {
            debug!("config"; "loading {}", config_path.display());
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(&root, cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve paths against `root` and apply CLI overrides.
    fn finalize(&mut self, root: &Path, cli: &Cli) {
        self.root = normalize_path(root);
        self.paths.normalize(&self.root);
        self.apply_command_options(cli);
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    ///
    /// CLI paths are relative to the working directory, not the config root.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Run {
                paths, pipeline, ..
            } => {
                Self::update_path(&mut self.paths.source, paths.source.as_deref());
                Self::update_path(&mut self.paths.output, paths.output.as_deref());
                Self::update_path(&mut self.paths.external, paths.external.as_deref());
                self.apply_pipeline_args(pipeline);
            }
            Commands::Process {
                dir,
                external,
                pipeline,
            } => {
                Self::update_path(&mut self.paths.output, dir.as_deref());
                Self::update_path(&mut self.paths.external, external.as_deref());
                self.apply_pipeline_args(pipeline);
            }
            Commands::Inspect { external, .. } => {
                Self::update_path(&mut self.paths.external, external.as_deref());
            }
        }
    }

    fn apply_pipeline_args(&mut self, args: &PipelineArgs) {
        Self::update_option(&mut self.pipeline.workers, args.workers.as_ref());
        Self::update_option(&mut self.pipeline.stages, args.stages.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    fn update_path(config_path: &mut PathBuf, cli_path: Option<&Path>) {
        if let Some(path) = cli_path {
            *config_path = normalize_path(path);
        }
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Absolute paths of the three metadata inputs.
    pub fn metadata_paths(&self) -> MetadataPaths {
        let external = &self.paths.external;
        MetadataPaths {
            authors: external.join(&self.metadata.authors),
            comments: external.join(&self.metadata.comments),
            comments_css: external.join(&self.metadata.comments_css),
        }
    }

    /// Absolute path of the page opened after a run.
    pub fn open_page(&self) -> PathBuf {
        self.paths.output.join(&self.open.page)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.pipeline.validate(&mut diag);
        self.site.validate(&mut diag);
        self.stylesheet.validate(&mut diag);

        diag.into_result()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> LeafmendConfig {
    let (parsed, ignored) = LeafmendConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
