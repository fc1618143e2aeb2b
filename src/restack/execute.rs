//! Rebase execution - effectful operations
//!
//! Checks out the dependent PR and replays its own commits onto the default
//! branch. A failed rebase is always followed by `git rebase --abort`, so the
//! next PR starts from a working copy without a pending rebase.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::repo::GitRepository;
use crate::restack::outcome::RestackFailure;
use crate::types::PullRequest;
use tracing::{debug, warn};

/// Marker git prints on stderr when a commit cannot be replayed cleanly
const CONFLICT_MARKER: &str = "could not apply";

/// Rebase `pr` onto `target_base`, dropping the commits of its merged dependency
///
/// `merge_commit` is the dependency's merge commit and marks the old parent:
/// only commits reachable from the PR's head branch but not from it are
/// replayed.
pub async fn rebase_onto_dependency(
    repo: &dyn GitRepository,
    platform: &dyn PlatformService,
    target_base: &str,
    pr: &PullRequest,
    dependency: &PullRequest,
    merge_commit: &str,
) -> std::result::Result<(), RestackFailure> {
    if let Err(e) = platform.checkout_pr(pr.number).await {
        debug!(pr_number = pr.number, error = %e, "checkout failed");
        return Err(RestackFailure::CheckoutFailed {
            number: pr.number,
            stderr: e.stderr().map_or_else(|| e.to_string(), ToString::to_string),
        });
    }

    match rebase_with_abort(repo, target_base, merge_commit, &pr.head_ref).await {
        Ok(()) => {
            debug!(pr_number = pr.number, target_base, "rebased");
            Ok(())
        }
        Err(e) if is_conflict(&e) => Err(RestackFailure::RebaseConflict {
            branch: pr.head_ref.clone(),
            onto: target_base.to_string(),
            old_parent: merge_commit.to_string(),
        }),
        Err(e) => Err(RestackFailure::RebaseFailed {
            number: dependency.number,
            source: e,
        }),
    }
}

/// Run the rebase; on failure, always attempt an abort before returning
///
/// The abort's own result is logged and dropped: the rebase error is what
/// gets reported either way.
pub async fn rebase_with_abort(
    repo: &dyn GitRepository,
    new_base: &str,
    old_base: &str,
    branch: &str,
) -> Result<()> {
    let result = repo.rebase_onto(new_base, old_base, branch).await;
    if result.is_err()
        && let Err(abort_err) = repo.abort_rebase().await
    {
        warn!(
            branch,
            error = %abort_err,
            "git rebase --abort failed; the working copy may need manual cleanup"
        );
    }
    result
}

fn is_conflict(err: &Error) -> bool {
    err.stderr().is_some_and(|stderr| stderr.contains(CONFLICT_MARKER))
}
