//! Command-line interface definition.
//!
//! - `mpa config` - print the bundler configuration as JSON
//! - `mpa pages` - list discovered pages
//! - `mpa check` - validate the project layout
//! - `mpa init` - write a default `mpa.toml`

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, InitArgs, PagesArgs, ProjectArgs};
pub use enums::*;

/// mpa - multi-page application build configuration
#[derive(Parser, Debug)]
#[command(
    name = "mpa",
    version,
    about = "Generate bundler configuration for multi-page applications",
    long_about = "mpa discovers page entries under src/pages/<page>/<name>.js and emits the\n\
                  bundler configuration: one HTML output per page, shared commons chunk,\n\
                  loader rules, output templates and dev server settings."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(subcommand)]
    pub command: Command,
}
