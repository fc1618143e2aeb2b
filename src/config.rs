//! Configuration file for gh-restack
//!
//! Optional TOML at `<config_dir>/gh-restack/config.toml`. CLI flags override
//! file values, which override the defaults.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user's config dir
const CONFIG_DIR: &str = "gh-restack";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Explicit paths to the external tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    /// Path to `git`
    pub git: Option<PathBuf>,
    /// Path to `gh`
    pub gh: Option<PathBuf>,
}

/// Settings loaded from the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote holding the default branch
    pub remote: String,
    /// Author whose PRs are restacked (`@me` for the current user)
    pub author: String,
    /// Tool locations; `PATH` lookup when unset
    pub tools: ToolPaths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            author: "@me".to_string(),
            tools: ToolPaths::default(),
        }
    }
}

/// Default config file location, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
