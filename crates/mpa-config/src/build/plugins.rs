use std::path::Path;

use serde::Serialize;

use crate::config::MpaConfig;
use crate::pages::PagePluginSpec;

/// A plugin instance the bundler should register, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plugin")]
pub enum PluginSpec {
    /// Extract imported CSS into standalone files
    #[serde(rename = "mini-css-extract")]
    CssExtract { filename: String },

    /// Copy files into the output tree unchanged
    #[serde(rename = "copy")]
    Copy { patterns: Vec<CopyPattern> },

    /// Empty the output directory before emitting
    #[serde(rename = "clean")]
    Clean,

    #[serde(rename = "html")]
    Html(PagePluginSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyPattern {
    pub from: String,
    pub to: String,
}

impl CopyPattern {
    /// Copy `dir` to the same relative location in the output tree.
    pub fn mirror(dir: &Path) -> Self {
        let rel = format!("./{}", dir.to_string_lossy().trim_start_matches("./"));
        Self {
            from: rel.clone(),
            to: rel,
        }
    }
}

/// Stylesheet extraction, static copy and cleaning come first, then one
/// HTML plugin per page.
pub fn plugin_list(config: &MpaConfig, pages: Vec<PagePluginSpec>) -> Vec<PluginSpec> {
    let mut plugins = vec![PluginSpec::CssExtract {
        filename: config.output.css_filename.clone(),
    }];

    if let Some(dir) = &config.assets.static_dir {
        plugins.push(PluginSpec::Copy {
            patterns: vec![CopyPattern::mirror(dir)],
        });
    }

    if config.output.clean {
        plugins.push(PluginSpec::Clean);
    }

    plugins.extend(pages.into_iter().map(PluginSpec::Html));
    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn default_plugins_precede_pages() {
        let plugins = plugin_list(&MpaConfig::default(), Vec::new());
        let tags: Vec<_> = plugins
            .iter()
            .map(|p| serde_json::to_value(p).unwrap()["plugin"].clone())
            .collect();
        assert_eq!(tags, vec![json!("mini-css-extract"), json!("copy"), json!("clean")]);
    }

    #[test]
    fn static_dir_is_mirrored() {
        let pattern = CopyPattern::mirror(&PathBuf::from("public/static"));
        assert_eq!(pattern.from, "./public/static");
        assert_eq!(pattern.to, "./public/static");
    }

    #[test]
    fn disabled_steps_are_omitted() {
        let mut config = MpaConfig::default();
        config.assets.static_dir = None;
        config.output.clean = false;

        let plugins = plugin_list(&config, Vec::new());
        assert_eq!(plugins.len(), 1);
        assert!(matches!(plugins[0], PluginSpec::CssExtract { .. }));
    }
}
