//! Command implementations.
//!
//! Each command module provides an `execute` function taking the shared
//! project arguments and its own parsed arguments.

pub mod check;
pub mod config;
pub mod init;
pub mod pages;
pub(crate) mod project;

pub use check::execute as check_execute;
pub use config::execute as config_execute;
pub use init::execute as init_execute;
pub use pages::execute as pages_execute;
pub use project::Project;
