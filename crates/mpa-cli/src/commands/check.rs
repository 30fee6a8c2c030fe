//! `mpa check`: validate settings and the project layout.

use mpa_config::{ConfigValidator, FsValidator, SchemaValidator, discover_pages};

use crate::cli::{CheckArgs, ProjectArgs};
use crate::commands::Project;
use crate::error::Result;
use crate::ui;

/// # Validation Steps
///
/// 1. Schema validation of the materialized settings
/// 2. Layout validation (pages dir, template, static assets)
/// 3. Page discovery with the configured failure policy
pub fn execute(project_args: &ProjectArgs, args: CheckArgs) -> Result<()> {
    let mut project = Project::load(project_args)?;
    project.relax(args.allow_empty, false);

    SchemaValidator.validate(&project.settings)?;
    if project.settings.pages.allow_empty {
        // Layout problems are reported but tolerated.
        if let Err(err) = FsValidator::new(&project.root).validate(&project.settings) {
            ui::warning(&err.to_string());
        }
    } else {
        FsValidator::new(&project.root).validate(&project.settings)?;
    }

    let entries = discover_pages(&project.root, &project.settings.pages)?;
    if entries.contains(&project.settings.pages.commons_chunk) {
        return Err(mpa_config::ConfigError::ChunkNameConflict(
            project.settings.pages.commons_chunk.clone(),
        )
        .into());
    }

    ui::success(&format!(
        "{} page(s) ready for a {} build",
        entries.len(),
        project.mode
    ));
    Ok(())
}
