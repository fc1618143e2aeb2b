//! Local git working copy
//!
//! Wraps the handful of git operations the restack pipeline needs behind a
//! trait so the pipeline can be exercised without a real repository.

mod git;

pub use git::GitCli;

use crate::error::Result;
use async_trait::async_trait;

/// Git operations against the local working copy
#[async_trait]
pub trait GitRepository: Send + Sync {
    /// Whether any tracked or untracked change exists relative to HEAD
    async fn is_dirty(&self) -> Result<bool>;

    /// Fetch `branch` from `remote`
    async fn fetch(&self, remote: &str, branch: &str) -> Result<()>;

    /// `git rebase --onto <new_base> <old_base> <branch>`
    ///
    /// On failure the rebase may still be in progress; callers are expected
    /// to follow up with [`abort_rebase`](Self::abort_rebase).
    async fn rebase_onto(&self, new_base: &str, old_base: &str, branch: &str) -> Result<()>;

    /// `git rebase --abort`
    async fn abort_rebase(&self) -> Result<()>;
}
