//! gh-restack - rebase stacked GitHub pull requests onto merged dependencies
//!
//! A pull request declares the PR it builds on with a line such as
//! `Depends on: #123`. Once #123 is merged, the dependent branch still carries
//! the old commits of #123; `gh-restack` replays only the dependent commits
//! onto the default branch with `git rebase --onto`.
//!
//! The library holds the restack pipeline and its collaborator seams. The
//! `gh-restack` binary adds argument parsing, spinners and the colored report.

pub mod config;
pub mod error;
pub mod interrupt;
pub mod platform;
pub mod progress;
pub mod repo;
pub mod restack;
pub mod tool;
pub mod types;
