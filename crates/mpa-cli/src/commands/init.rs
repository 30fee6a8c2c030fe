//! `mpa init`: write the default settings file.

use std::fs;

use mpa_config::{CONFIG_FILE, MpaConfig};

use crate::cli::{InitArgs, ProjectArgs};
use crate::commands::project::resolve_root;
use crate::error::{CliError, Result};
use crate::ui;

pub fn execute(project_args: &ProjectArgs, args: InitArgs) -> Result<()> {
    let root = resolve_root(project_args.root.as_deref())?;
    let path = root.join(CONFIG_FILE);

    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path));
    }

    let content = MpaConfig::default().to_toml_string()?;
    fs::write(&path, content).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;

    ui::success(&format!("Created {}", path.display()));
    Ok(())
}
