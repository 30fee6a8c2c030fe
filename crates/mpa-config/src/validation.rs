//! Pluggable settings validation strategies
//!
//! Separates schema validation (values only) from filesystem validation of
//! the project layout.

use std::path::{Path, PathBuf};

use crate::config::MpaConfig;
use crate::discovery::is_root_relative;
use crate::error::{ConfigError, Result};

/// Trait for pluggable settings validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &MpaConfig) -> Result<()>;
}

/// Value checks only; nothing is read from disk.
///
/// # Example
///
/// ```
/// use mpa_config::{ConfigValidator, MpaConfig, SchemaValidator};
///
/// SchemaValidator.validate(&MpaConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &MpaConfig) -> Result<()> {
        if config.pages.dir.as_os_str().is_empty() {
            return Err(schema_error(
                "pages.dir cannot be empty",
                "Point pages.dir at the directory holding one folder per page",
            ));
        }

        ensure_root_relative("pages.dir", &config.pages.dir)?;
        if let Some(dir) = &config.assets.static_dir {
            ensure_root_relative("assets.static_dir", dir)?;
        }

        if config.pages.template.trim().is_empty() {
            return Err(schema_error(
                "pages.template cannot be empty",
                "Set pages.template to the shared HTML template",
            ));
        }

        let commons = &config.pages.commons_chunk;
        if commons.is_empty() || !commons.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(schema_error(
                format!("pages.commons_chunk '{commons}' is not a valid chunk name"),
                "Use letters, digits and underscores only",
            ));
        }

        for (field, template) in [
            ("output.filename", &config.output.filename),
            ("output.chunk_filename", &config.output.chunk_filename),
            ("output.css_filename", &config.output.css_filename),
        ] {
            if !template.contains("[name]") {
                return Err(schema_error(
                    format!("{field} '{template}' does not contain [name]"),
                    "Every page emits its own file; include the [name] placeholder",
                ));
            }
        }

        for ext in &config.resolve.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(schema_error(
                    format!("resolve extension '{ext}' must start with '.'"),
                    "Write extensions as \".js\", \".svelte\"",
                ));
            }
        }

        if config.resolve.aliases.keys().any(|k| k.trim().is_empty()) {
            return Err(schema_error(
                "resolve alias names cannot be empty",
                "Remove the empty key from resolve.aliases",
            ));
        }

        if config.dev.port == 0 {
            return Err(schema_error(
                "dev.port cannot be 0",
                "Pick a fixed port such as 8000",
            ));
        }

        Ok(())
    }
}

/// Project layout validator (for CLI use)
///
/// Runs schema validation, then checks that the pages directory, the HTML
/// template and the static asset directory exist under the root.
///
/// # Example
///
/// ```no_run
/// use mpa_config::{ConfigValidator, FsValidator, MpaConfig};
///
/// FsValidator::new(".").validate(&MpaConfig::default()).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &MpaConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let pages = self.root.join(&config.pages.dir);
        if !pages.is_dir() {
            return Err(crate::error::DiscoveryError::MissingPagesDir(pages).into());
        }

        let template = self.root.join(&config.pages.template);
        if !template.is_file() {
            return Err(ConfigError::TemplateNotFound(template));
        }

        if let Some(dir) = &config.assets.static_dir {
            let path = self.root.join(dir);
            if !path.is_dir() {
                return Err(ConfigError::StaticDirNotFound(path));
            }
        }

        Ok(())
    }
}

/// Reject absolute paths and paths that climb out of the project root.
///
/// Entry modules and copy patterns are emitted as `./<dir>/...`, which is
/// only meaningful for a directory below the root.
pub(crate) fn ensure_root_relative(field: &str, path: &Path) -> Result<()> {
    if is_root_relative(path) {
        return Ok(());
    }
    Err(schema_error(
        format!("{field} '{}' must be relative to the project root", path.display()),
        "Use a path below the project root without '..', such as \"src/pages\"",
    ))
}

fn schema_error(message: impl Into<String>, hint: &str) -> ConfigError {
    ConfigError::SchemaValidation {
        message: message.into(),
        hint: Some(hint.to_string()),
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &MpaConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &MpaConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
