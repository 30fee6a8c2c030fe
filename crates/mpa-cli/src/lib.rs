//! Command-line front end for `mpa-config`.
//!
//! - [`cli`] - argument definitions
//! - `commands` - one module per subcommand
//! - [`error`] - CLI error type and diagnostic conversion
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - status lines on stderr

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
