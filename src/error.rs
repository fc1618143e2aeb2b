//! Error types for gh-restack

use thiserror::Error;

/// Errors raised by the library and its external collaborators
///
/// Per-PR failures that must not abort the batch live in
/// [`RestackFailure`](crate::restack::RestackFailure) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A required executable could not be located
    #[error("required tool `{0}` not found on PATH")]
    ToolNotFound(String),

    /// The working copy has uncommitted or untracked changes
    #[error("current branch is dirty. please retry after stashing or committing your changes.")]
    DirtyWorkingCopy,

    /// An external command failed (non-zero exit or unexpected stderr output)
    #[error("`{program} {args}` failed{}: {}", exit_suffix(.status.as_ref()), .stderr.trim())]
    Command {
        /// Program name (e.g. "git")
        program: String,
        /// Arguments, space-joined for display
        args: String,
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// A merged PR came back without a merge commit
    #[error("PR #{0} is merged but has no recorded merge commit")]
    MissingMergeCommit(u64),

    /// The run was interrupted before any PR was processed
    #[error("interrupted")]
    Interrupted,

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// JSON decoding of tool output failed
    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (spawning a process, reading a file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Captured stderr of a failed command, if this error came from one
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Command { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

fn exit_suffix(status: Option<&i32>) -> String {
    status.map_or_else(String::new, |code| format!(" (exit {code})"))
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
