//! Core types for gh-restack

use serde::Deserialize;

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// A pull request snapshot
///
/// Fetched once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body/description (empty when the author left it blank)
    pub body: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Current state of the PR
    pub state: PrState,
    /// Web URL for the PR
    pub html_url: String,
    /// Merge commit SHA, present once the PR is merged
    pub merge_commit: Option<String>,
}

impl PullRequest {
    /// Whether the PR has landed
    pub fn is_merged(&self) -> bool {
        self.state == PrState::Merged
    }
}

/// Abbreviate a commit SHA to the usual 7 characters
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
