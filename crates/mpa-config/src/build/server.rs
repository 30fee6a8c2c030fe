use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::DevConfig;

/// Development server settings handed to the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    pub content_base: PathBuf,
    pub port: u16,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_page: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    pub hot: bool,
}

impl DevServerOptions {
    pub fn new(root: &Path, config: &DevConfig) -> Self {
        let mut headers = IndexMap::new();
        if let Some(origin) = &config.allow_origin {
            headers.insert("Access-Control-Allow-Origin".to_string(), origin.clone());
        }

        Self {
            content_base: root.join(&config.content_base),
            port: config.port,
            open: config.open,
            open_page: config.open_page.clone(),
            headers,
            hot: config.hot,
        }
    }
}
