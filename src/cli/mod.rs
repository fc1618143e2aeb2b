//! CLI commands and presentation

pub mod context;
pub mod report;
pub mod restack;
pub mod style;

use async_trait::async_trait;
use gh_restack::progress::ProgressCallback;
use indicatif::ProgressBar;

/// Progress callback that shows the latest message on a spinner
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Report progress on `spinner`
    pub const fn new(spinner: ProgressBar) -> Self {
        Self { spinner }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        tracing::debug!(message, "progress");
        self.spinner.set_message(message.to_string());
    }
}
