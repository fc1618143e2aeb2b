//! Shared command context
//!
//! Resolves configuration and locates the external tools before anything
//! touches the repository.

use gh_restack::config::Config;
use gh_restack::error::Result;
use gh_restack::platform::{GhCliService, PlatformService};
use gh_restack::repo::{GitCli, GitRepository};
use gh_restack::restack::RestackOptions;
use gh_restack::tool::Tool;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values given on the command line; `None` falls back to the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Remote name
    pub remote: Option<String>,
    /// PR author filter
    pub author: Option<String>,
    /// Path to `git`
    pub git_path: Option<PathBuf>,
    /// Path to `gh`
    pub gh_path: Option<PathBuf>,
}

/// Everything a restack run needs
pub struct CommandContext {
    /// Platform service (`gh`)
    pub platform: Box<dyn PlatformService>,
    /// Local working copy (`git`)
    pub repo: Box<dyn GitRepository>,
    /// Resolved run options
    pub options: RestackOptions,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Fails with `ToolNotFound` when `git` or `gh` cannot be located; no
    /// command has been run at that point.
    pub fn new(path: &Path, overrides: Overrides) -> Result<Self> {
        let config = Config::load(overrides.config.as_deref())?;
        debug!(?config, "loaded config");

        let git_path = overrides.git_path.or(config.tools.git);
        let gh_path = overrides.gh_path.or(config.tools.gh);

        let git = Tool::locate("git", git_path.as_deref(), path)?;
        let gh = Tool::locate("gh", gh_path.as_deref(), path)?;

        let options = RestackOptions {
            remote: overrides.remote.unwrap_or(config.remote),
            author: overrides.author.unwrap_or(config.author),
        };

        Ok(Self {
            platform: Box::new(GhCliService::new(gh)),
            repo: Box::new(GitCli::new(git)),
            options,
        })
    }
}
