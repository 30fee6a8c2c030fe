//! Assembly of the complete bundler configuration.
//!
//! [`BuildConfig`] is what the external bundler consumes: the discovered
//! entries, one HTML plugin per page, and every static piece of wiring
//! (resolution, output templates, loader rules, dev server).

mod plugins;
mod resolve;
mod rules;
mod server;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{MpaConfig, OutputConfig, PagesConfig};
use crate::discovery::{EntryDiscovery, EntryMap};
use crate::error::{ConfigError, Result};
use crate::mode::{BuildMode, Devtool};
use crate::pages::{PageOptions, PagePluginSpec, generate_page_plugins};
use crate::validation::ensure_root_relative;

pub use plugins::{CopyPattern, PluginSpec, plugin_list};
pub use resolve::{ResolveOptions, find_package_dir};
pub use rules::{
    CSS_EXTRACT_LOADER, CSS_LOADER, LESS_LOADER, LoaderUse, ModuleOptions, ModuleRule,
    RuleResolve, STYLE_LOADER, SVELTE_LOADER,
};
pub use server::DevServerOptions;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub mode: BuildMode,
    pub entry: EntryMap,
    pub resolve: ResolveOptions,
    pub output: OutputOptions,
    pub module: ModuleOptions,
    pub plugins: Vec<PluginSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
    pub devtool: Devtool,
    pub dev_server: DevServerOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub path: PathBuf,
    pub filename: String,
    pub chunk_filename: String,
}

impl OutputOptions {
    pub fn new(root: &Path, config: &OutputConfig) -> Self {
        Self {
            path: root.join(&config.dir),
            filename: config.filename.clone(),
            chunk_filename: config.chunk_filename.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub split_chunks: SplitChunks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    pub cache_groups: IndexMap<String, CacheGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    pub name: String,
    pub chunks: String,
    pub min_chunks: u32,
}

impl Optimization {
    /// Move modules imported by at least two pages into `name`.
    pub fn commons(name: &str) -> Self {
        let mut cache_groups = IndexMap::new();
        cache_groups.insert(
            name.to_string(),
            CacheGroup {
                name: name.to_string(),
                chunks: "initial".to_string(),
                min_chunks: 2,
            },
        );
        Self {
            split_chunks: SplitChunks { cache_groups },
        }
    }
}

/// Discover pages and apply the configured failure policy.
///
/// Discovery errors and an empty pages directory are fatal unless
/// `pages.allow_empty` is set, in which case they are logged and an empty
/// map is returned.
pub fn discover_pages(root: &Path, pages: &PagesConfig) -> Result<EntryMap> {
    let discovery = EntryDiscovery::new(root)
        .pages_dir(&pages.dir)
        .duplicates(pages.duplicates);

    let entries = match discovery.discover() {
        Ok(entries) => entries,
        Err(err) if pages.allow_empty => {
            tracing::warn!("{err}");
            EntryMap::default()
        }
        Err(err) => return Err(err.into()),
    };

    if entries.is_empty() {
        if !pages.allow_empty {
            return Err(ConfigError::NoPages(root.join(&pages.dir)));
        }
        tracing::warn!("no pages discovered; no HTML will be emitted");
    } else {
        tracing::info!(count = entries.len(), "discovered pages");
    }

    Ok(entries)
}

impl BuildConfig {
    /// Discover pages under `root` and build the full configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mpa_config::{BuildConfig, BuildMode, MpaConfig};
    ///
    /// let settings = MpaConfig::load(".")?.materialize_profile(BuildMode::Production)?;
    /// let config = BuildConfig::assemble(".", &settings, BuildMode::Production)?;
    /// println!("{}", config.to_json_pretty()?);
    /// # Ok::<(), mpa_config::ConfigError>(())
    /// ```
    pub fn assemble(root: impl AsRef<Path>, config: &MpaConfig, mode: BuildMode) -> Result<Self> {
        let root = root.as_ref();
        let entries = discover_pages(root, &config.pages)?;
        Self::from_entries(root, config, mode, entries)
    }

    /// Build the configuration from an already discovered entry map.
    pub fn from_entries(
        root: impl AsRef<Path>,
        config: &MpaConfig,
        mode: BuildMode,
        entries: EntryMap,
    ) -> Result<Self> {
        let root = root.as_ref();
        let commons = config.pages.commons_chunk.as_str();

        if entries.contains(commons) {
            return Err(ConfigError::ChunkNameConflict(commons.to_string()));
        }
        if let Some(dir) = &config.assets.static_dir {
            ensure_root_relative("assets.static_dir", dir)?;
        }

        let page_options = PageOptions::new(mode)
            .template(config.pages.template.clone())
            .commons_chunk(commons);
        let pages = generate_page_plugins(&entries, &page_options);

        Ok(Self {
            mode,
            resolve: ResolveOptions::new(root, &config.resolve),
            output: OutputOptions::new(root, &config.output),
            module: ModuleOptions::for_mode(mode),
            plugins: plugin_list(config, pages),
            optimization: config
                .output
                .split_commons
                .then(|| Optimization::commons(commons)),
            devtool: mode.devtool(),
            dev_server: DevServerOptions::new(root, &config.dev),
            entry: entries,
        })
    }

    /// The HTML plugins, one per page.
    pub fn page_plugins(&self) -> impl Iterator<Item = &PagePluginSpec> {
        self.plugins.iter().filter_map(|plugin| match plugin {
            PluginSpec::Html(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
