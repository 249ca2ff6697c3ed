//! Whole-tree file work around the page pipeline.
//!
//! - `copy`: mirror snapshot → output directory, before the pipeline
//! - `stylesheet`: literal CSS patches on the output, after the pipeline

mod copy;
mod stylesheet;

pub use copy::copy_tree;
pub use stylesheet::patch_stylesheets;
