//! Review-platform services
//!
//! Provides the interface the restack pipeline uses to query pull requests
//! and check them out locally.

mod gh;

pub use gh::GhCliService;

use crate::error::Result;
use crate::types::PullRequest;
use async_trait::async_trait;

/// Platform service trait for PR operations
///
/// The production implementation shells out to the `gh` CLI; tests use a
/// hand-written mock that records calls.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Name of the repository's default branch (e.g. "main")
    async fn default_branch(&self) -> Result<String>;

    /// List open and draft PRs authored by `author` (`@me` for the current user)
    async fn list_open_prs(&self, author: &str) -> Result<Vec<PullRequest>>;

    /// Fetch a single PR by number, in any state
    async fn get_pr(&self, number: u64) -> Result<PullRequest>;

    /// Check out the head branch of a PR in the local working copy
    async fn checkout_pr(&self, number: u64) -> Result<()>;
}
