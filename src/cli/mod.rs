//! Command-line interface module.

mod args;
pub mod inspect;
pub mod run;

pub use args::{Cli, Commands, PipelineArgs};
