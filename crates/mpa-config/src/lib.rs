//! Multi-page application build configuration.
//!
//! Discovers page entries from the `src/pages/<page>/<name>.js` convention,
//! generates one HTML output per page and assembles the configuration object
//! consumed by the bundler.
//!
//! ```no_run
//! use mpa_config::{BuildConfig, BuildMode, MpaConfig};
//!
//! let mode = BuildMode::from_env()?;
//! let settings = MpaConfig::load(".")?.materialize_profile(mode)?;
//! let config = BuildConfig::assemble(".", &settings, mode)?;
//! for page in config.page_plugins() {
//!     println!("{} <- {:?}", page.filename, page.chunks);
//! }
//! # Ok::<(), mpa_config::ConfigError>(())
//! ```

pub mod build;
pub mod config;
pub mod discovery;
pub mod error;
pub mod mode;
pub mod pages;
pub mod validation;

// Re-export main types
pub use build::{BuildConfig, PluginSpec, discover_pages};
pub use config::*;
pub use discovery::{DuplicatePolicy, EntryDiscovery, EntryMap, discover_entries};
pub use error::*;
pub use mode::{BuildMode, Devtool};
pub use pages::{
    COMMONS_CHUNK, DEFAULT_TEMPLATE, HtmlMinify, PageOptions, PagePluginSpec,
    generate_page_plugins,
};

pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
