//! Shared test helpers and fixtures

#![allow(dead_code)]

pub mod mock_platform;
pub mod mock_repo;

pub use mock_platform::MockPlatformService;
pub use mock_repo::{MockGitRepository, RebaseCall};

use gh_restack::types::{PrState, PullRequest};
use std::sync::{Arc, Mutex};

/// Ordered log of collaborator calls shared by the platform and repo mocks
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    /// Record a call
    pub fn record(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }

    /// All calls in order
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

/// Platform and repo mocks that share one event log
pub fn mocks() -> (MockPlatformService, MockGitRepository, Arc<EventLog>) {
    let events = Arc::new(EventLog::default());
    (
        MockPlatformService::with_events(Arc::clone(&events)),
        MockGitRepository::with_events(Arc::clone(&events)),
        events,
    )
}

/// Open PR `number` on branch `head` with the given body
pub fn make_pr(number: u64, head: &str, body: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR {number}"),
        body: body.to_string(),
        base_ref: "main".to_string(),
        head_ref: head.to_string(),
        is_draft: false,
        state: PrState::Open,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        merge_commit: None,
    }
}

/// Merged PR `number` with the given merge commit
pub fn make_merged_pr(number: u64, head: &str, merge_commit: &str) -> PullRequest {
    PullRequest {
        state: PrState::Merged,
        merge_commit: Some(merge_commit.to_string()),
        ..make_pr(number, head, "")
    }
}
