//! Dependency classification - pure functions
//!
//! No I/O happens here; the effectful lookup and rebase live in
//! `run` and `execute`.

use crate::error::Error;
use crate::restack::outcome::RestackFailure;
use crate::types::PullRequest;

/// What to do with a PR given the references found in its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyPlan {
    /// No reference: nothing to restack
    None,
    /// Several references: refuse to guess which one is the base
    Ambiguous(Vec<u64>),
    /// Exactly one reference: look it up
    Single(u64),
}

/// Classify extracted references
pub fn plan_dependency(refs: &[u64]) -> DependencyPlan {
    match refs {
        [] => DependencyPlan::None,
        [number] => DependencyPlan::Single(*number),
        _ => DependencyPlan::Ambiguous(refs.to_vec()),
    }
}

/// Check that a fetched dependency has landed and return its merge commit
pub fn check_dependency_merged(dependency: &PullRequest) -> Result<&str, RestackFailure> {
    if !dependency.is_merged() {
        return Err(RestackFailure::DependencyNotMerged {
            number: dependency.number,
            state: dependency.state,
        });
    }
    dependency
        .merge_commit
        .as_deref()
        .ok_or(RestackFailure::DependencyLookupFailed {
            number: dependency.number,
            source: Error::MissingMergeCommit(dependency.number),
        })
}
