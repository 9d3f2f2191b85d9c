//! Command-line interface module.

mod commands;
mod inspect;
mod run;

pub use commands::{Cli, Commands, RunArgs};
pub use inspect::{print_progress, print_stubs};
pub use run::run_pipeline;
