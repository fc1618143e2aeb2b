//! Per-PR outcomes and the aggregated report

use crate::error::Error;
use crate::types::{PrState, PullRequest, short_sha};
use thiserror::Error;

/// Why a PR was not rebased
///
/// Every variant is terminal for its PR and never aborts the batch.
#[derive(Error, Debug)]
pub enum RestackFailure {
    /// The body declares no dependency (the common case, not an error)
    #[error("no dependencies found")]
    NoDependency,

    /// More than one dependency declared; none is picked
    #[error("multiple dependencies found: {}", format_refs(.0))]
    AmbiguousDependency(Vec<u64>),

    /// The dependency could not be fetched or has no usable merge commit
    #[error("failed to get depended PR #{number}: {source}")]
    DependencyLookupFailed {
        /// Dependency PR number
        number: u64,
        /// Underlying error
        source: Error,
    },

    /// The dependency exists but has not been merged yet
    #[error("depended PR #{number} is not merged ({state})")]
    DependencyNotMerged {
        /// Dependency PR number
        number: u64,
        /// State observed on the platform
        state: PrState,
    },

    /// Switching the working copy to the dependent branch failed
    #[error("failed to checkout PR #{number}: {}", .stderr.trim())]
    CheckoutFailed {
        /// Dependent PR number
        number: u64,
        /// Diagnostic output of the checkout
        stderr: String,
    },

    /// Replaying the dependent commits hit a content conflict
    #[error(
        "conflicted while rebasing {branch} onto {onto} (old parent: {})",
        short_sha(.old_parent)
    )]
    RebaseConflict {
        /// Dependent branch
        branch: String,
        /// New base (e.g. `origin/main`)
        onto: String,
        /// Merge commit of the dependency
        old_parent: String,
    },

    /// The rebase failed for a reason other than a conflict
    #[error("failed to rebase onto depended PR #{number}: {source}")]
    RebaseFailed {
        /// Dependency PR number
        number: u64,
        /// Underlying error
        source: Error,
    },

    /// The run was interrupted before this PR was processed
    #[error("skipped: interrupted before processing")]
    Interrupted,
}

impl RestackFailure {
    /// Whether this outcome is expected rather than an error worth flagging
    pub const fn is_informational(&self) -> bool {
        matches!(self, Self::NoDependency)
    }

    /// Whether this outcome counts as a failed PR
    ///
    /// Skipped PRs of a cancelled run are neither rebased nor failed.
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::NoDependency | Self::Interrupted)
    }
}

fn format_refs(refs: &[u64]) -> String {
    refs.iter()
        .map(|n| format!("#{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Final outcome for one fetched PR
///
/// Either rebased onto its dependency or carrying exactly one failure; the
/// constructors are the only way to build one.
#[derive(Debug)]
pub struct ProcessedPr {
    pr: PullRequest,
    dependencies: Vec<u64>,
    dependency: Option<PullRequest>,
    failure: Option<RestackFailure>,
}

impl ProcessedPr {
    /// PR was rebased onto the merge commit of `dependency`
    pub const fn rebased(pr: PullRequest, dependencies: Vec<u64>, dependency: PullRequest) -> Self {
        Self {
            pr,
            dependencies,
            dependency: Some(dependency),
            failure: None,
        }
    }

    /// PR was not rebased
    pub const fn failed(
        pr: PullRequest,
        dependencies: Vec<u64>,
        dependency: Option<PullRequest>,
        failure: RestackFailure,
    ) -> Self {
        Self {
            pr,
            dependencies,
            dependency,
            failure: Some(failure),
        }
    }

    /// The PR as fetched
    pub const fn pr(&self) -> &PullRequest {
        &self.pr
    }

    /// Dependency references found in the body
    pub fn dependencies(&self) -> &[u64] {
        &self.dependencies
    }

    /// Resolved dependency snapshot, if the lookup got that far
    pub const fn dependency(&self) -> Option<&PullRequest> {
        self.dependency.as_ref()
    }

    /// Why the PR was not rebased, if it wasn't
    pub const fn failure(&self) -> Option<&RestackFailure> {
        self.failure.as_ref()
    }

    /// Whether the PR was rebased
    pub const fn is_rebased(&self) -> bool {
        self.failure.is_none()
    }
}

/// Ordered outcomes of one run, one per fetched PR
#[derive(Debug, Default)]
pub struct RestackReport {
    outcomes: Vec<ProcessedPr>,
}

impl RestackReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome
    pub fn push(&mut self, outcome: ProcessedPr) {
        self.outcomes.push(outcome);
    }

    /// All outcomes in fetch order
    pub fn outcomes(&self) -> &[ProcessedPr] {
        &self.outcomes
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no PR was processed
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Rebased PRs, in fetch order
    pub fn rebased(&self) -> impl Iterator<Item = &ProcessedPr> {
        self.outcomes.iter().filter(|o| o.is_rebased())
    }

    /// PRs that were not rebased, in fetch order
    pub fn not_rebased(&self) -> impl Iterator<Item = &ProcessedPr> {
        self.outcomes.iter().filter(|o| !o.is_rebased())
    }

    /// Count of not-rebased PRs whose failure is a real error
    pub fn error_count(&self) -> usize {
        self.not_rebased()
            .filter(|o| o.failure().is_some_and(RestackFailure::is_error))
            .count()
    }

    /// Count of PRs skipped because the run was interrupted
    pub fn interrupted_count(&self) -> usize {
        self.not_rebased()
            .filter(|o| matches!(o.failure(), Some(RestackFailure::Interrupted)))
            .count()
    }
}
