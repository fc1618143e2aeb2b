//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use gh_restack::error::{Error, Result};
use gh_restack::platform::PlatformService;
use gh_restack::types::PullRequest;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::EventLog;

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable PR list and per-number lookups
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    default_branch: Mutex<String>,
    open_prs: Mutex<Vec<PullRequest>>,
    pr_responses: Mutex<HashMap<u64, PullRequest>>,
    events: Arc<EventLog>,
    // Call tracking
    list_calls: Mutex<Vec<String>>,
    get_pr_calls: Mutex<Vec<u64>>,
    checkout_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_default_branch: Mutex<Option<String>>,
    error_on_list: Mutex<Option<String>>,
    error_on_get_pr: Mutex<HashMap<u64, String>>,
    error_on_checkout: Mutex<HashMap<u64, String>>,
}

impl MockPlatformService {
    /// Create a mock with "main" as the default branch and no PRs
    pub fn new() -> Self {
        Self::with_events(Arc::new(EventLog::default()))
    }

    /// Create a mock that records into a shared event log
    pub fn with_events(events: Arc<EventLog>) -> Self {
        Self {
            default_branch: Mutex::new("main".to_string()),
            open_prs: Mutex::new(Vec::new()),
            pr_responses: Mutex::new(HashMap::new()),
            events,
            list_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            checkout_calls: Mutex::new(Vec::new()),
            error_on_default_branch: Mutex::new(None),
            error_on_list: Mutex::new(None),
            error_on_get_pr: Mutex::new(HashMap::new()),
            error_on_checkout: Mutex::new(HashMap::new()),
        }
    }

    // === Response setup ===

    /// Set the default branch name
    pub fn set_default_branch(&self, name: &str) {
        *self.default_branch.lock().unwrap() = name.to_string();
    }

    /// Set the PRs returned by `list_open_prs`
    pub fn set_open_prs(&self, prs: Vec<PullRequest>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Set the response for `get_pr` for a specific number
    pub fn set_pr(&self, pr: PullRequest) {
        self.pr_responses.lock().unwrap().insert(pr.number, pr);
    }

    // === Error injection methods ===

    /// Make `default_branch` return an error
    pub fn fail_default_branch(&self, msg: &str) {
        *self.error_on_default_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pr` return an error for a specific number
    pub fn fail_get_pr(&self, number: u64, msg: &str) {
        self.error_on_get_pr
            .lock()
            .unwrap()
            .insert(number, msg.to_string());
    }

    /// Make `checkout_pr` fail for a specific number with the given stderr
    pub fn fail_checkout(&self, number: u64, stderr: &str) {
        self.error_on_checkout
            .lock()
            .unwrap()
            .insert(number, stderr.to_string());
    }

    // === Call verification methods ===

    /// Authors passed to `list_open_prs`
    pub fn get_list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Numbers passed to `get_pr`
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Numbers passed to `checkout_pr`
    pub fn get_checkout_calls(&self) -> Vec<u64> {
        self.checkout_calls.lock().unwrap().clone()
    }

    /// Assert that no PR was checked out
    pub fn assert_no_checkout(&self) {
        let calls = self.get_checkout_calls();
        assert!(calls.is_empty(), "Expected no checkout but got: {calls:?}");
    }

    /// Assert that no dependency lookup happened
    pub fn assert_no_lookup(&self) {
        let calls = self.get_pr_calls();
        assert!(calls.is_empty(), "Expected no get_pr call but got: {calls:?}");
    }
}

fn command_error(args: &str, stderr: &str) -> Error {
    Error::Command {
        program: "gh".to_string(),
        args: args.to_string(),
        status: Some(1),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn default_branch(&self) -> Result<String> {
        self.events.record("gh repo view");
        if let Some(msg) = self.error_on_default_branch.lock().unwrap().as_ref() {
            return Err(command_error("repo view", msg));
        }
        Ok(self.default_branch.lock().unwrap().clone())
    }

    async fn list_open_prs(&self, author: &str) -> Result<Vec<PullRequest>> {
        self.events.record("gh pr list");
        self.list_calls.lock().unwrap().push(author.to_string());
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(command_error("pr list", msg));
        }
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn get_pr(&self, number: u64) -> Result<PullRequest> {
        self.events.record(&format!("gh pr view {number}"));
        self.get_pr_calls.lock().unwrap().push(number);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().get(&number) {
            return Err(command_error(&format!("pr view {number}"), msg));
        }

        let responses = self.pr_responses.lock().unwrap();
        responses.get(&number).cloned().ok_or_else(|| {
            command_error(
                &format!("pr view {number}"),
                &format!("GraphQL: Could not resolve to a PullRequest with the number of {number}."),
            )
        })
    }

    async fn checkout_pr(&self, number: u64) -> Result<()> {
        self.events.record(&format!("gh pr checkout {number}"));
        self.checkout_calls.lock().unwrap().push(number);

        if let Some(stderr) = self.error_on_checkout.lock().unwrap().get(&number) {
            return Err(command_error(&format!("pr checkout {number}"), stderr));
        }
        Ok(())
    }
}
