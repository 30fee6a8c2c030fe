//! mpa - multi-page build configuration generator.
//!
//! Parses arguments, initializes logging and dispatches to the command
//! implementations.

use clap::Parser;
use miette::Result;
use mpa_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Config(config_args) => commands::config_execute(&args.project, config_args),
        cli::Command::Pages(pages_args) => commands::pages_execute(&args.project, pages_args),
        cli::Command::Check(check_args) => commands::check_execute(&args.project, check_args),
        cli::Command::Init(init_args) => commands::init_execute(&args.project, init_args),
    };

    result.map_err(error::cli_error_to_miette)
}
