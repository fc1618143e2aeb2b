//! Progress reporting for long-running operations

use async_trait::async_trait;

/// Receives human-readable progress messages from the restack pipeline
///
/// The CLI forwards these to a spinner; tests use [`NoopProgress`].
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called with a short status line (e.g. "Rebasing feat-b onto origin/main")
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards every message
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
