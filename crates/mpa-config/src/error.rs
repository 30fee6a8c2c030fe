//! Error types for page discovery, settings loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failure to map the pages directory onto an entry map.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(
        "file structure is incorrect for the expected layout: pages directory not found: {}",
        .0.display()
    )]
    MissingPagesDir(PathBuf),

    #[error("pages directory must be a relative path inside the project root: {}", .0.display())]
    PagesDirOutsideRoot(PathBuf),

    #[error(
        "file structure is incorrect for the expected layout: {} (expected {}/<page>/<name>.js)",
        .path.display(),
        .pages_dir.display()
    )]
    StructureMismatch { path: PathBuf, pages_dir: PathBuf },

    #[error("page '{page}' has more than one entry: {first} and {second}")]
    DuplicatePage {
        page: String,
        first: String,
        second: String,
    },

    #[error("failed to scan pages directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("no pages found under {}", .0.display())]
    NoPages(PathBuf),

    #[error("page name '{0}' collides with the shared chunk name")]
    ChunkNameConflict(String),

    #[error("invalid build mode '{0}' (expected 'development' or 'production')")]
    InvalidMode(String),

    // Filesystem validation errors (for CLI use)
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("static asset directory not found: {}", .0.display())]
    StaticDirNotFound(PathBuf),

    // Config parsing/loading errors
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}{}", .hint.as_ref().map(|h| format!("\n\nHint: {h}")).unwrap_or_default())]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
