//! Project settings and per-mode profile merging.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `mpa.toml` in the project root, or the `mpa` field of `package.json`
//! 3. `MPA_`-prefixed environment variables (`MPA_DEV__PORT=9000`)
//!
//! The `[profiles.<mode>]` tables are applied afterwards by
//! [`MpaConfig::materialize_profile`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::discovery::DuplicatePolicy;
use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;
use crate::pages::{COMMONS_CHUNK, DEFAULT_TEMPLATE};

pub const CONFIG_FILE: &str = "mpa.toml";
pub const PACKAGE_JSON_FIELD: &str = "mpa";
pub const ENV_PREFIX: &str = "MPA_";

pub const DEFAULT_PAGES_DIR: &str = "src/pages";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MpaConfig {
    #[serde(default)]
    pub pages: PagesConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default)]
    pub dev: DevConfig,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Directory holding one sub-directory per page, relative to the root
    pub dir: PathBuf,

    /// HTML template shared by every page
    pub template: String,

    /// Name of the chunk shared by every page
    pub commons_chunk: String,

    /// Continue with zero pages instead of failing
    pub allow_empty: bool,

    pub duplicates: DuplicatePolicy,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_PAGES_DIR),
            template: DEFAULT_TEMPLATE.to_string(),
            commons_chunk: COMMONS_CHUNK.to_string(),
            allow_empty: false,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,

    /// Entry bundle filename template
    pub filename: String,

    /// Non-entry chunk filename template
    pub chunk_filename: String,

    /// Extracted stylesheet filename template
    pub css_filename: String,

    /// Empty the output directory before emitting
    pub clean: bool,

    /// Split code shared by several pages into the commons chunk
    pub split_commons: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dist"),
            filename: "public/js/[name].[chunkhash].js".to_string(),
            chunk_filename: "public/js/[name].[chunkhash].js".to_string(),
            css_filename: "public/css/[name].[contenthash].css".to_string(),
            clean: true,
            split_commons: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Copied unchanged to the same relative path in the output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: Some(PathBuf::from("public/static")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Import prefix to directory, relative to the root
    pub aliases: IndexMap<String, PathBuf>,

    /// Packages aliased to their installed directory under `node_modules`
    pub packages: Vec<String>,

    pub extensions: Vec<String>,

    pub main_fields: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        let mut aliases = IndexMap::new();
        aliases.insert("@".to_string(), PathBuf::from("src"));
        aliases.insert("@public".to_string(), PathBuf::from("public"));

        Self {
            aliases,
            packages: vec!["svelte".to_string()],
            extensions: [".mjs", ".js", ".svelte"].map(String::from).to_vec(),
            main_fields: ["svelte", "browser", "module", "main"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    pub port: u16,

    /// Open a browser once the server is up
    pub open: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_page: Option<String>,

    pub content_base: PathBuf,

    /// Value of the `Access-Control-Allow-Origin` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_origin: Option<String>,

    pub hot: bool,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            open: true,
            open_page: Some("heathCheck.html".to_string()),
            content_base: PathBuf::from("src"),
            allow_origin: Some("*".to_string()),
            hot: true,
        }
    }
}

/// Partial overrides applied for one build mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub pages: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub output: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub assets: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub resolve: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub dev: Value,
}

/// Where file-based settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Toml(PathBuf),
    PackageJson(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Toml(path) | ConfigSource::PackageJson(path) => path,
        }
    }
}

impl MpaConfig {
    /// Find a settings file in `root`.
    ///
    /// Searches in this order:
    /// 1. `mpa.toml`
    /// 2. `package.json` with a non-null `mpa` field
    ///
    /// A `package.json` that exists but cannot be parsed is an error.
    pub fn find(root: impl AsRef<Path>) -> Result<Option<ConfigSource>> {
        let root = root.as_ref();

        let toml_path = root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Ok(Some(ConfigSource::Toml(toml_path)));
        }

        let pkg_path = root.join("package.json");
        if !pkg_path.is_file() {
            return Ok(None);
        }

        let parsed = read_package_json(&pkg_path)?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Ok(Some(ConfigSource::PackageJson(pkg_path))),
            _ => Ok(None),
        }
    }

    /// Load settings for a project root. A missing settings file is not an
    /// error; defaults and environment variables still apply.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let source = Self::find(root.as_ref())?;
        if let Some(source) = &source {
            tracing::debug!(path = %source.path().display(), "loading settings");
        }
        Self::extract(source.as_ref())
    }

    /// Load settings from an explicit file (`*.toml`, `package.json` or `*.json`).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let source = if path.file_name().is_some_and(|n| n == "package.json") {
            ConfigSource::PackageJson(path.to_path_buf())
        } else if path.extension().is_some_and(|e| e == "json") {
            return Self::extract_figment(base_figment().merge(Json::file(path)));
        } else {
            ConfigSource::Toml(path.to_path_buf())
        };

        Self::extract(Some(&source))
    }

    fn extract(source: Option<&ConfigSource>) -> Result<Self> {
        let mut figment = base_figment();

        match source {
            Some(ConfigSource::Toml(path)) => {
                figment = figment.merge(Toml::file(path));
            }
            Some(ConfigSource::PackageJson(path)) => {
                figment = figment.merge(Serialized::defaults(package_json_field(path)?));
            }
            None => {}
        }

        Self::extract_figment(figment)
    }

    fn extract_figment(figment: Figment) -> Result<Self> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: if e.path.is_empty() {
                    "config".to_string()
                } else {
                    e.path.join(".")
                },
                hint: Some(e.kind.to_string()),
            })
    }

    /// Apply `[profiles.<mode>]` overrides on top of the base sections.
    pub fn materialize_profile(mut self, mode: BuildMode) -> Result<Self> {
        let Some(profile) = self.profiles.get(mode.as_str()).cloned() else {
            return Ok(self);
        };

        tracing::debug!(profile = mode.as_str(), "applying settings profile");
        merge_section(&mut self.pages, &profile.pages)?;
        merge_section(&mut self.output, &profile.output)?;
        merge_section(&mut self.assets, &profile.assets)?;
        merge_section(&mut self.resolve, &profile.resolve)?;
        merge_section(&mut self.dev, &profile.dev)?;

        Ok(self)
    }

    /// Render the settings as an `mpa.toml` document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

fn base_figment() -> Figment {
    Figment::new().merge(Serialized::defaults(MpaConfig::default()))
}

fn read_package_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })
}

fn package_json_field(path: &Path) -> Result<Value> {
    let mut parsed = read_package_json(path)?;

    match parsed.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
        Some(value) if value.is_object() => Ok(value),
        Some(_) => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("The 'mpa' field must be an object".to_string()),
        }),
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some("Add an 'mpa' field to your package.json".to_string()),
        }),
    }
}

fn merge_section<T>(section: &mut T, update: &Value) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    if update.is_null() {
        return Ok(());
    }

    let mut base = serde_json::to_value(&*section).map_err(|err| {
        ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        }
    })?;
    merge_values(&mut base, update);
    *section = serde_json::from_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })?;
    Ok(())
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
