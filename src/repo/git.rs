//! Git working copy backed by the `git` CLI

use crate::error::Result;
use crate::repo::GitRepository;
use crate::tool::Tool;
use async_trait::async_trait;
use tracing::debug;

/// Git repository accessed through the `git` executable
pub struct GitCli {
    git: Tool,
}

impl GitCli {
    /// Create a repository handle around a located `git` binary
    ///
    /// The tool's working directory selects the repository. Rebases run in
    /// a background process group, so git must never prompt on the terminal.
    pub fn new(git: Tool) -> Self {
        Self {
            git: git.with_env("GIT_TERMINAL_PROMPT", "0"),
        }
    }
}

#[async_trait]
impl GitRepository for GitCli {
    async fn is_dirty(&self) -> Result<bool> {
        let stdout = self.git.run(&["status", "--porcelain"]).await?;
        let dirty = !stdout.trim().is_empty();
        debug!(dirty, "checked working copy");
        Ok(dirty)
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(remote, branch, "fetching");
        self.git.run(&["fetch", remote, branch]).await?;
        Ok(())
    }

    async fn rebase_onto(&self, new_base: &str, old_base: &str, branch: &str) -> Result<()> {
        debug!(new_base, old_base, branch, "rebasing");
        self.git
            .run_detached(&["rebase", "--onto", new_base, old_base, branch])
            .await?;
        Ok(())
    }

    async fn abort_rebase(&self) -> Result<()> {
        debug!("aborting rebase");
        self.git.run_detached(&["rebase", "--abort"]).await?;
        Ok(())
    }
}
