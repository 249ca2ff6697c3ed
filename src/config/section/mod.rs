//! Configuration section definitions.
//!
//! Each module corresponds to a section in `leafmend.toml`:
//!
//! | Module       | TOML Section                        | Purpose                     |
//! |--------------|-------------------------------------|-----------------------------|
//! | `paths`      | `[paths]`, `[metadata]`, `[open]`   | Directories and input files |
//! | `pipeline`   | `[pipeline]`                        | Workers and stage order     |
//! | `site`       | `[site.*]`                          | Per-pipe selectors and text |
//! | `stylesheet` | `[[stylesheet.patch]]`              | Post-run stylesheet edits   |

mod paths;
pub mod pipeline;
pub mod site;
mod stylesheet;

pub use paths::{MetadataFilesConfig, OpenConfig, PathsConfig};
pub use pipeline::{PipelineConfig, StageKind};
pub use site::SiteConfig;
pub use stylesheet::{StylesheetConfig, StylesheetPatch};
