//! Build mode selection.
//!
//! The mode is read from `NODE_ENV` once, at the edge, and then passed
//! explicitly to every component that depends on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable that selects the build mode.
pub const MODE_ENV_VAR: &str = "NODE_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

/// Source-map setting handed to the bundler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Devtool {
    Disabled,
    SourceMap,
}

impl Serialize for Devtool {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Devtool::Disabled => serializer.serialize_bool(false),
            Devtool::SourceMap => serializer.serialize_str("source-map"),
        }
    }
}

impl BuildMode {
    /// Parse the value of `NODE_ENV`. Unset or empty means development.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            None | Some("") => Ok(BuildMode::Development),
            Some(other) => other.parse(),
        }
    }

    /// Read the mode from `NODE_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = std::env::var(MODE_ENV_VAR).ok();
        Self::from_env_value(value.as_deref())
    }

    pub fn is_production(self) -> bool {
        self == BuildMode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    /// Source maps are emitted in development only.
    pub fn devtool(self) -> Devtool {
        if self.is_production() {
            Devtool::Disabled
        } else {
            Devtool::SourceMap
        }
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(BuildMode::Development),
            "production" => Ok(BuildMode::Production),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
