//! `mpa config`: emit the bundler configuration.

use std::fs;

use mpa_config::BuildConfig;

use crate::cli::{ConfigArgs, ProjectArgs};
use crate::commands::Project;
use crate::error::{CliError, Result};
use crate::ui;

/// Discover pages and print (or write) the configuration as JSON.
///
/// Discovery failures abort the command unless `--allow-empty` is given.
pub fn execute(project_args: &ProjectArgs, args: ConfigArgs) -> Result<()> {
    let mut project = Project::load(project_args)?;
    project.relax(args.allow_empty, args.allow_duplicate_pages);

    let config = BuildConfig::assemble(&project.root, &project.settings, project.mode)?;
    let json = config.to_json_pretty()?;

    match args.output {
        Some(path) => {
            let path = project.root.join(path);
            fs::write(&path, format!("{json}\n")).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            ui::success(&format!(
                "Wrote {} config for {} page(s) to {}",
                project.mode,
                config.entry.len(),
                path.display()
            ));
        }
        None => println!("{json}"),
    }

    Ok(())
}
