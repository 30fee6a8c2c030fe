//! `mpa pages`: list discovered pages.

use mpa_config::{PageOptions, discover_pages, generate_page_plugins};

use crate::cli::{PagesArgs, ProjectArgs};
use crate::commands::Project;
use crate::error::Result;
use crate::ui;

pub fn execute(project_args: &ProjectArgs, args: PagesArgs) -> Result<()> {
    let mut project = Project::load(project_args)?;
    project.relax(args.allow_empty, args.allow_duplicate_pages);

    let entries = discover_pages(&project.root, &project.settings.pages)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        ui::info(&format!(
            "No pages under {}",
            project.root.join(&project.settings.pages.dir).display()
        ));
        return Ok(());
    }

    let options = PageOptions::new(project.mode)
        .template(project.settings.pages.template.clone())
        .commons_chunk(project.settings.pages.commons_chunk.clone());
    let specs = generate_page_plugins(&entries, &options);

    let width = entries.pages().map(str::len).max().unwrap_or(0);
    for ((page, module), spec) in entries.iter().zip(&specs) {
        println!("{page:<width$}  {module}  -> {}", spec.filename);
    }

    Ok(())
}
