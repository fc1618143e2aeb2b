//! Mock git repository for testing

#![allow(dead_code)]

use async_trait::async_trait;
use gh_restack::error::{Error, Result};
use gh_restack::repo::GitRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::EventLog;

/// Call record for `rebase_onto`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseCall {
    pub new_base: String,
    pub old_base: String,
    pub branch: String,
}

/// Mock working copy
///
/// Tracks whether a rebase is "in progress" so tests can check that every
/// failed rebase is cleaned up.
pub struct MockGitRepository {
    events: Arc<EventLog>,
    dirty: AtomicBool,
    rebase_in_progress: AtomicBool,
    // Call tracking
    fetch_calls: Mutex<Vec<(String, String)>>,
    rebase_calls: Mutex<Vec<RebaseCall>>,
    abort_count: Mutex<usize>,
    // Error injection
    error_on_status: Mutex<Option<String>>,
    error_on_fetch: Mutex<Option<String>>,
    error_on_rebase: Mutex<HashMap<String, String>>,
    error_on_abort: Mutex<Option<String>>,
}

impl MockGitRepository {
    /// Clean working copy with every operation succeeding
    pub fn new() -> Self {
        Self::with_events(Arc::new(EventLog::default()))
    }

    /// Create a mock that records into a shared event log
    pub fn with_events(events: Arc<EventLog>) -> Self {
        Self {
            events,
            dirty: AtomicBool::new(false),
            rebase_in_progress: AtomicBool::new(false),
            fetch_calls: Mutex::new(Vec::new()),
            rebase_calls: Mutex::new(Vec::new()),
            abort_count: Mutex::new(0),
            error_on_status: Mutex::new(None),
            error_on_fetch: Mutex::new(None),
            error_on_rebase: Mutex::new(HashMap::new()),
            error_on_abort: Mutex::new(None),
        }
    }

    /// Simulate uncommitted changes
    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.store(dirty, Ordering::SeqCst);
    }

    /// Make `git status` fail
    pub fn fail_status(&self, msg: &str) {
        *self.error_on_status.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `git fetch` fail
    pub fn fail_fetch(&self, msg: &str) {
        *self.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make rebasing `branch` fail with the given stderr, leaving a rebase in progress
    pub fn fail_rebase(&self, branch: &str, stderr: &str) {
        self.error_on_rebase
            .lock()
            .unwrap()
            .insert(branch.to_string(), stderr.to_string());
    }

    /// Make `git rebase --abort` fail
    pub fn fail_abort(&self, msg: &str) {
        *self.error_on_abort.lock().unwrap() = Some(msg.to_string());
    }

    /// All `(remote, branch)` pairs fetched
    pub fn get_fetch_calls(&self) -> Vec<(String, String)> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// All rebase calls
    pub fn get_rebase_calls(&self) -> Vec<RebaseCall> {
        self.rebase_calls.lock().unwrap().clone()
    }

    /// Number of `git rebase --abort` calls
    pub fn abort_count(&self) -> usize {
        *self.abort_count.lock().unwrap()
    }

    /// Whether a simulated rebase is still pending
    pub fn rebase_in_progress(&self) -> bool {
        self.rebase_in_progress.load(Ordering::SeqCst)
    }

    /// Assert that no rebase was attempted
    pub fn assert_no_rebase(&self) {
        let calls = self.get_rebase_calls();
        assert!(calls.is_empty(), "Expected no rebase but got: {calls:?}");
    }
}

fn command_error(args: &str, status: i32, stderr: &str) -> Error {
    Error::Command {
        program: "git".to_string(),
        args: args.to_string(),
        status: Some(status),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl GitRepository for MockGitRepository {
    async fn is_dirty(&self) -> Result<bool> {
        self.events.record("git status");
        if let Some(msg) = self.error_on_status.lock().unwrap().as_ref() {
            return Err(command_error("status --porcelain", 128, msg));
        }
        Ok(self.dirty.load(Ordering::SeqCst))
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.events.record(&format!("git fetch {remote} {branch}"));
        self.fetch_calls
            .lock()
            .unwrap()
            .push((remote.to_string(), branch.to_string()));
        if let Some(msg) = self.error_on_fetch.lock().unwrap().as_ref() {
            return Err(command_error(&format!("fetch {remote} {branch}"), 128, msg));
        }
        Ok(())
    }

    async fn rebase_onto(&self, new_base: &str, old_base: &str, branch: &str) -> Result<()> {
        self.events.record(&format!("git rebase --onto {new_base} {old_base} {branch}"));
        assert!(
            !self.rebase_in_progress(),
            "rebase started while a previous rebase was still in progress"
        );
        self.rebase_calls.lock().unwrap().push(RebaseCall {
            new_base: new_base.to_string(),
            old_base: old_base.to_string(),
            branch: branch.to_string(),
        });

        if let Some(stderr) = self.error_on_rebase.lock().unwrap().get(branch) {
            self.rebase_in_progress.store(true, Ordering::SeqCst);
            return Err(command_error(
                &format!("rebase --onto {new_base} {old_base} {branch}"),
                1,
                stderr,
            ));
        }
        Ok(())
    }

    async fn abort_rebase(&self) -> Result<()> {
        self.events.record("git rebase --abort");
        *self.abort_count.lock().unwrap() += 1;
        // The abort clears the rebase state even when reporting an error
        self.rebase_in_progress.store(false, Ordering::SeqCst);
        if let Some(msg) = self.error_on_abort.lock().unwrap().as_ref() {
            return Err(command_error("rebase --abort", 128, msg));
        }
        Ok(())
    }
}
