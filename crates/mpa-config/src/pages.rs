//! Per-page HTML emission directives.

use serde::{Serialize, Serializer};

use crate::discovery::EntryMap;
use crate::mode::BuildMode;

/// Default name of the chunk shared by every page.
pub const COMMONS_CHUNK: &str = "commons";

/// Default HTML template shared by every page.
pub const DEFAULT_TEMPLATE: &str = "./public/index.html";

/// Minification settings for generated HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlMinify {
    /// Minify with the plugin's own defaults (serialized as `true`).
    Defaults,
    Options {
        remove_comments: bool,
        collapse_whitespace: bool,
        minify_css: bool,
    },
}

impl HtmlMinify {
    pub fn for_mode(mode: BuildMode) -> Self {
        if mode.is_production() {
            HtmlMinify::Options {
                remove_comments: true,
                collapse_whitespace: true,
                minify_css: true,
            }
        } else {
            HtmlMinify::Defaults
        }
    }
}

impl Serialize for HtmlMinify {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        match *self {
            HtmlMinify::Defaults => serializer.serialize_bool(true),
            HtmlMinify::Options {
                remove_comments,
                collapse_whitespace,
                minify_css,
            } => {
                let mut s = serializer.serialize_struct("HtmlMinify", 3)?;
                s.serialize_field("removeComments", &remove_comments)?;
                s.serialize_field("collapseWhitespace", &collapse_whitespace)?;
                s.serialize_field("minifyCSS", &minify_css)?;
                s.end()
            }
        }
    }
}

/// One HTML output: `<page>.html` built from the shared template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePluginSpec {
    pub filename: String,
    pub template: String,
    pub chunks: Vec<String>,
    pub minify: HtmlMinify,
}

impl PagePluginSpec {
    /// Page name this spec was generated for.
    pub fn page(&self) -> &str {
        self.filename.strip_suffix(".html").unwrap_or(&self.filename)
    }
}

/// Inputs shared by every generated page.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub template: String,
    pub commons_chunk: String,
    pub mode: BuildMode,
}

impl PageOptions {
    pub fn new(mode: BuildMode) -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            commons_chunk: COMMONS_CHUNK.to_string(),
            mode,
        }
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn commons_chunk(mut self, name: impl Into<String>) -> Self {
        self.commons_chunk = name.into();
        self
    }
}

/// Produce one spec per page, in entry map order.
///
/// An empty map yields no specs.
pub fn generate_page_plugins(entries: &EntryMap, options: &PageOptions) -> Vec<PagePluginSpec> {
    let minify = HtmlMinify::for_mode(options.mode);

    entries
        .pages()
        .map(|page| PagePluginSpec {
            filename: format!("{page}.html"),
            template: options.template.clone(),
            chunks: vec![page.to_string(), options.commons_chunk.clone()],
            minify,
        })
        .collect()
}
