//! Error handling for the CLI.
//!
//! `CliError` wraps the library's [`ConfigError`] together with the I/O and
//! serialization failures that only the CLI produces. `main` converts it into
//! a `miette` report.

mod report;

use std::path::PathBuf;

use mpa_config::ConfigError;
use thiserror::Error;

pub use report::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

impl CliError {
    /// Suggested fix shown under the error.
    pub fn hint(&self) -> Option<&'static str> {
        use mpa_config::DiscoveryError;

        match self {
            CliError::Config(ConfigError::Discovery(DiscoveryError::MissingPagesDir(_))) => {
                Some("Create src/pages/<page>/<name>.js or point pages.dir at your pages")
            }
            CliError::Config(ConfigError::Discovery(DiscoveryError::PagesDirOutsideRoot(_))) => {
                Some("Set pages.dir to a path below the project root, such as src/pages")
            }
            CliError::Config(ConfigError::Discovery(DiscoveryError::StructureMismatch {
                ..
            })) => Some("Each page lives in its own folder: src/pages/<page>/<name>.js"),
            CliError::Config(ConfigError::Discovery(DiscoveryError::DuplicatePage { .. })) => {
                Some("Keep one .js entry per page folder, or pass --allow-duplicate-pages")
            }
            CliError::Config(ConfigError::NoPages(_)) => {
                Some("Add a page folder with a .js entry, or pass --allow-empty")
            }
            CliError::Config(ConfigError::ChunkNameConflict(_)) => {
                Some("Rename the page or set pages.commons_chunk to another name")
            }
            CliError::Config(ConfigError::InvalidMode(_)) => {
                Some("Set NODE_ENV to 'development' or 'production', or pass --mode")
            }
            CliError::AlreadyExists(_) => Some("Pass --force to overwrite it"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_config::DiscoveryError;

    #[test]
    fn config_error_converts() {
        let err: CliError = ConfigError::NoPages(PathBuf::from("src/pages")).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("no pages found"));
    }

    #[test]
    fn discovery_errors_carry_hints() {
        let err: CliError = ConfigError::from(DiscoveryError::DuplicatePage {
            page: "home".to_string(),
            first: "./src/pages/home/a.js".to_string(),
            second: "./src/pages/home/b.js".to_string(),
        })
        .into();
        assert!(err.hint().unwrap().contains("--allow-duplicate-pages"));
    }

    #[test]
    fn io_errors_have_no_hint() {
        let err: CliError = std::io::Error::other("boom").into();
        assert!(err.hint().is_none());
    }
}
