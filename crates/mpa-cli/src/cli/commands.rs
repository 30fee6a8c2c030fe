use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::Mode;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the bundler configuration as JSON
    ///
    /// Discovers pages, generates one HTML plugin per page and emits the
    /// complete configuration object.
    Config(ConfigArgs),

    /// List discovered pages
    Pages(PagesArgs),

    /// Validate settings and the project layout
    ///
    /// Checks that the pages directory, template and static assets exist
    /// and that page discovery succeeds.
    Check(CheckArgs),

    /// Write a default mpa.toml into the project root
    Init(InitArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root containing src/pages
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Settings file (defaults to mpa.toml or the "mpa" field of package.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build mode (overrides NODE_ENV)
    #[arg(long, global = true, value_enum)]
    pub mode: Option<Mode>,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Write the configuration to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Continue with zero pages instead of failing
    #[arg(long)]
    pub allow_empty: bool,

    /// Let the lexicographically last entry win when a page has several
    #[arg(long)]
    pub allow_duplicate_pages: bool,
}

#[derive(Args, Debug, Default)]
pub struct PagesArgs {
    /// Print the entry map as JSON
    #[arg(long)]
    pub json: bool,

    /// Continue with zero pages instead of failing
    #[arg(long)]
    pub allow_empty: bool,

    /// Let the lexicographically last entry win when a page has several
    #[arg(long)]
    pub allow_duplicate_pages: bool,
}

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Continue with zero pages instead of failing
    #[arg(long)]
    pub allow_empty: bool,
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing mpa.toml
    #[arg(long)]
    pub force: bool,
}
