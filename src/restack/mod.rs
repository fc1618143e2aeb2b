//! Restack engine for dependent PRs
//!
//! Three-phase pattern:
//! 1. Gather - guard the working copy, list PRs (effectful, fatal on error)
//! 2. Plan - parse dependency annotations and classify them (pure, testable)
//! 3. Execute - look up the dependency and rebase onto it (effectful,
//!    failures isolated per PR)

mod execute;
mod outcome;
mod parse;
mod plan;
mod run;

pub use execute::{rebase_onto_dependency, rebase_with_abort};
pub use outcome::{ProcessedPr, RestackFailure, RestackReport};
pub use parse::extract_dependencies;
pub use plan::{DependencyPlan, check_dependency_merged, plan_dependency};
pub use run::{
    GatheredState, RestackOptions, ensure_clean, gather_pull_requests, process_pr,
    resolve_dependency, restack_pull_requests,
};
