//! Restack orchestration
//!
//! Drives each fetched PR through parse → plan → lookup → rebase, one at a
//! time. The working copy is shared by every PR, so nothing here runs
//! concurrently.

use crate::error::{Error, Result};
use crate::interrupt::Interrupt;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::repo::GitRepository;
use crate::restack::execute::rebase_onto_dependency;
use crate::restack::outcome::{ProcessedPr, RestackFailure, RestackReport};
use crate::restack::parse::extract_dependencies;
use crate::restack::plan::{DependencyPlan, check_dependency_merged, plan_dependency};
use crate::types::PullRequest;
use tracing::{debug, info};

/// Repository state gathered before any PR is processed
#[derive(Debug, Clone)]
pub struct GatheredState {
    /// Default branch name, fixed for the whole run
    pub default_branch: String,
    /// Open and draft PRs of the author, in platform order
    pub pull_requests: Vec<PullRequest>,
}

/// Options for a restack run
#[derive(Debug, Clone)]
pub struct RestackOptions {
    /// Remote holding the default branch (e.g. "origin")
    pub remote: String,
    /// Author filter for listing PRs (`@me` for the current user)
    pub author: String,
}

impl Default for RestackOptions {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            author: "@me".to_string(),
        }
    }
}

impl RestackOptions {
    /// Ref the dependent branches are rebased onto, e.g. `origin/main`
    pub fn target_base(&self, default_branch: &str) -> String {
        format!("{}/{default_branch}", self.remote)
    }
}

/// Fail with [`Error::DirtyWorkingCopy`] unless the working copy is clean
pub async fn ensure_clean(repo: &dyn GitRepository) -> Result<()> {
    if repo.is_dirty().await? {
        return Err(Error::DirtyWorkingCopy);
    }
    Ok(())
}

/// Resolve the default branch, refresh it from the remote and list PRs
///
/// Every error here is fatal to the run.
pub async fn gather_pull_requests(
    platform: &dyn PlatformService,
    repo: &dyn GitRepository,
    options: &RestackOptions,
) -> Result<GatheredState> {
    let default_branch = platform.default_branch().await?;
    repo.fetch(&options.remote, &default_branch).await?;
    let pull_requests = platform.list_open_prs(&options.author).await?;
    info!(
        default_branch = %default_branch,
        count = pull_requests.len(),
        "gathered pull requests"
    );

    Ok(GatheredState {
        default_branch,
        pull_requests,
    })
}

/// Fetch a dependency PR, mapping any error to a lookup failure
///
/// Queries share the terminal's process group, so a Ctrl+C kills a pending
/// lookup. A lookup that fails after the interrupt is reported as
/// [`RestackFailure::Interrupted`].
pub async fn resolve_dependency(
    platform: &dyn PlatformService,
    number: u64,
    interrupt: &Interrupt,
) -> std::result::Result<PullRequest, RestackFailure> {
    platform.get_pr(number).await.map_err(|source| {
        if interrupt.is_triggered() {
            debug!(dependency = number, error = %source, "lookup cut short by interrupt");
            RestackFailure::Interrupted
        } else {
            RestackFailure::DependencyLookupFailed { number, source }
        }
    })
}

/// Restack every PR in order and collect one outcome per PR
///
/// Once `interrupt` is raised, PRs not yet started are recorded as
/// [`RestackFailure::Interrupted`]; a PR already being rebased finishes first.
pub async fn restack_pull_requests(
    pull_requests: Vec<PullRequest>,
    platform: &dyn PlatformService,
    repo: &dyn GitRepository,
    target_base: &str,
    progress: &dyn ProgressCallback,
    interrupt: &Interrupt,
) -> RestackReport {
    let mut report = RestackReport::new();

    for pr in pull_requests {
        if interrupt.is_triggered() {
            let dependencies = extract_dependencies(&pr.body);
            report.push(ProcessedPr::failed(
                pr,
                dependencies,
                None,
                RestackFailure::Interrupted,
            ));
            continue;
        }

        let outcome = process_pr(pr, platform, repo, target_base, progress, interrupt).await;
        report.push(outcome);
    }

    report
}

/// Take a single PR to its terminal outcome
pub async fn process_pr(
    pr: PullRequest,
    platform: &dyn PlatformService,
    repo: &dyn GitRepository,
    target_base: &str,
    progress: &dyn ProgressCallback,
    interrupt: &Interrupt,
) -> ProcessedPr {
    let dependencies = extract_dependencies(&pr.body);
    debug!(pr_number = pr.number, ?dependencies, "extracted dependencies");

    let number = match plan_dependency(&dependencies) {
        DependencyPlan::None => {
            return ProcessedPr::failed(pr, dependencies, None, RestackFailure::NoDependency);
        }
        DependencyPlan::Ambiguous(refs) => {
            let failure = RestackFailure::AmbiguousDependency(refs);
            return ProcessedPr::failed(pr, dependencies, None, failure);
        }
        DependencyPlan::Single(number) => number,
    };

    progress
        .on_message(&format!("Checking PR #{number} for #{}", pr.number))
        .await;

    let dependency = match resolve_dependency(platform, number, interrupt).await {
        Ok(dependency) => dependency,
        Err(failure) => {
            debug!(pr_number = pr.number, dependency = number, %failure, "lookup failed");
            return ProcessedPr::failed(pr, dependencies, None, failure);
        }
    };

    let merge_commit = match check_dependency_merged(&dependency) {
        Ok(merge_commit) => merge_commit.to_string(),
        Err(failure) => {
            debug!(pr_number = pr.number, dependency = number, %failure, "dependency not ready");
            return ProcessedPr::failed(pr, dependencies, Some(dependency), failure);
        }
    };

    if interrupt.is_triggered() {
        return ProcessedPr::failed(
            pr,
            dependencies,
            Some(dependency),
            RestackFailure::Interrupted,
        );
    }

    progress
        .on_message(&format!("Rebasing {} onto {target_base}", pr.head_ref))
        .await;

    match rebase_onto_dependency(repo, platform, target_base, &pr, &dependency, &merge_commit).await
    {
        Ok(()) => {
            info!(pr_number = pr.number, dependency = number, "rebased");
            ProcessedPr::rebased(pr, dependencies, dependency)
        }
        Err(failure) => {
            info!(pr_number = pr.number, dependency = number, %failure, "rebase failed");
            ProcessedPr::failed(pr, dependencies, Some(dependency), failure)
        }
    }
}
