use std::path::{Path, PathBuf};

use mpa_config::{BuildMode, DuplicatePolicy, MpaConfig};

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};

/// Root, mode and materialized settings for one invocation.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub mode: BuildMode,
    pub settings: MpaConfig,
}

impl Project {
    /// Resolve the root, pick the mode (`--mode`, then `NODE_ENV`) and load
    /// settings with the mode's profile applied.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = resolve_root(args.root.as_deref())?;

        let mode = match args.mode {
            Some(mode) => mode.into(),
            None => BuildMode::from_env()?,
        };

        let settings = match &args.config {
            Some(path) => MpaConfig::load_from(root.join(path))?,
            None => MpaConfig::load(&root)?,
        };
        let settings = settings.materialize_profile(mode)?;

        tracing::debug!(root = %root.display(), mode = %mode, "project loaded");
        Ok(Self {
            root,
            mode,
            settings,
        })
    }

    /// Apply command-line switches that relax page discovery.
    pub fn relax(&mut self, allow_empty: bool, allow_duplicates: bool) {
        if allow_empty {
            self.settings.pages.allow_empty = true;
        }
        if allow_duplicates {
            self.settings.pages.duplicates = DuplicatePolicy::LastWins;
        }
    }
}

pub(crate) fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = match root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(CliError::RootNotFound(root));
    }
    Ok(root.canonicalize()?)
}
